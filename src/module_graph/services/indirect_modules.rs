use std::collections::HashSet;

/// Parses `go list -m -f "{{.Indirect}} {{.Path}}" all` output into the set
/// of modules go.mod marks as `// indirect`.
///
/// Each line is split at its first space; only lines whose first field is
/// exactly `true` contribute. Anything else, malformed lines included, is
/// treated as not indirect.
pub fn parse_indirect_modules(listing: &str) -> HashSet<String> {
    listing
        .lines()
        .filter_map(|line| line.split_once(' '))
        .filter(|(flag, _)| *flag == "true")
        .map(|(_, path)| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indirect_modules() {
        let listing = "false example.com/myapp\n\
                       false github.com/pkg/errors\n\
                       true golang.org/x/sys\n\
                       true golang.org/x/text\n";
        let indirect = parse_indirect_modules(listing);
        assert_eq!(indirect.len(), 2);
        assert!(indirect.contains("golang.org/x/sys"));
        assert!(indirect.contains("golang.org/x/text"));
        assert!(!indirect.contains("github.com/pkg/errors"));
    }

    #[test]
    fn test_malformed_lines_are_not_indirect() {
        let listing = "true\n\ngarbage\nTRUE golang.org/x/net\ntrue golang.org/x/sys\r\n";
        let indirect = parse_indirect_modules(listing);
        assert_eq!(indirect, HashSet::from(["golang.org/x/sys".to_string()]));
    }

    #[test]
    fn test_empty_listing() {
        assert!(parse_indirect_modules("").is_empty());
    }
}
