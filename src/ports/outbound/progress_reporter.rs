/// ProgressReporter port for diagnostics during a run
///
/// All diagnostics go through this port and end up on stderr, keeping
/// stdout for the report itself.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a batch operation (e.g. proxy lookups)
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Total expected items
    /// * `message` - Optional label for the current item
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
