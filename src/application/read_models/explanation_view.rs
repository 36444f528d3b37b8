//! Views answering "why is this module in my build?"

use crate::ports::outbound::LatestVersionInfo;
use serde::Serialize;

/// A direct requirement of the main module that has to be upgraded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredModuleView {
    pub name: String,
    /// Highest version present in the local graph
    pub local_version: String,
    /// Filled only when latest-version lookups were requested and succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestVersionInfo>,
}

/// Outcome of the analysis for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Explanation {
    /// The main module requires the module itself; `go get` it directly
    Direct { module: String, root: String },
    /// The module only arrives transitively through `required_by`
    Indirect {
        module: String,
        required_by: Vec<RequiredModuleView>,
        /// Cycles that cut some parent chains short
        #[serde(skip_serializing_if = "Vec::is_empty")]
        cycles: Vec<String>,
    },
}

impl Explanation {
    pub fn module(&self) -> &str {
        match self {
            Explanation::Direct { module, .. } | Explanation::Indirect { module, .. } => module,
        }
    }
}

/// Failed latest-version lookup, reported after the main result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupFailureView {
    pub module: String,
    pub error: String,
}

/// Full report produced by `ExplainModuleUseCase`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationReport {
    pub explanation: Explanation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lookup_failures: Vec<LookupFailureView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanation_module() {
        let direct = Explanation::Direct {
            module: "a".to_string(),
            root: "root".to_string(),
        };
        assert_eq!(direct.module(), "a");

        let indirect = Explanation::Indirect {
            module: "b".to_string(),
            required_by: vec![],
            cycles: vec![],
        };
        assert_eq!(indirect.module(), "b");
    }

    #[test]
    fn test_explanation_serializes_with_kind_tag() {
        let report = ExplanationReport {
            explanation: Explanation::Direct {
                module: "a".to_string(),
                root: "root".to_string(),
            },
            lookup_failures: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["explanation"]["kind"], "direct");
        assert_eq!(json["explanation"]["module"], "a");
        assert!(json.get("lookup_failures").is_none());
    }
}
