use super::PackageFilter;
use crate::module_graph::domain::{Graph, PackageItem};
use crate::shared::error::ModWhyError;
use std::collections::HashSet;

/// GraphBuilder service reconstructing a `Graph` from `go mod graph` output
///
/// The input is one edge per line, `parent child`, where each token is
/// `name` (main module only) or `name@version`. The builder is pure: the
/// caller supplies the raw text and the set of `// indirect` modules.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    filter: PackageFilter,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips every edge touching a module matched by `filter`
    pub fn with_filter(mut self, filter: PackageFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &PackageFilter {
        &self.filter
    }

    /// Parses the whole edge list.
    ///
    /// Blank lines are ignored. A line without exactly two fields aborts the
    /// parse; no partial graph is returned.
    ///
    /// # Errors
    /// `ModWhyError::MalformedInput` with the offending line and its field
    /// count
    pub fn build(
        &self,
        input: &str,
        root_indirect_mods: HashSet<String>,
    ) -> Result<Graph, ModWhyError> {
        let mut graph = Graph::new(root_indirect_mods);

        for line in input.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let (from, to) = Self::parse_edge(line)?;

            // Evaluate both sides so the filter records every pattern it used
            let skip_from = self.filter.matches(&from.name);
            let skip_to = self.filter.matches(&to.name);
            if skip_from || skip_to {
                continue;
            }

            graph.observe(&from);
            graph.observe(&to);
            graph.link(&from, &to);
        }

        Ok(graph)
    }

    fn parse_edge(line: &str) -> Result<(PackageItem, PackageItem), ModWhyError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [from, to] => Ok((PackageItem::parse(from), PackageItem::parse(to))),
            _ => Err(ModWhyError::MalformedInput {
                line: line.to_string(),
                field_count: fields.len(),
            }),
        }
    }
}
