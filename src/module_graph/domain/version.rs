use semver::Version;
use std::cmp::Ordering;

/// Parses a Go module version into a `semver::Version`.
///
/// Accepts an optional leading `v` and the `vMAJOR` / `vMAJOR.MINOR`
/// shorthands, which are padded with zero components. Returns `None` for
/// anything that is not a semantic version.
fn parse_module_version(version: &str) -> Option<Version> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    if trimmed.is_empty() {
        return None;
    }

    let split_at = trimmed
        .find(|c: char| c == '-' || c == '+')
        .unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split_at);

    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        3 => trimmed.to_string(),
        _ => return None,
    };

    Version::parse(&padded).ok()
}

/// Compares two module versions by semantic version precedence.
///
/// Build metadata (`+incompatible`) does not take part in the ordering.
/// Invalid versions sort below every valid one and compare equal to each
/// other.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_module_version(a), parse_module_version(b)) {
        (Some(a), Some(b)) => a
            .major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
