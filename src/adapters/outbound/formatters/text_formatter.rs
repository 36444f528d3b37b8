use crate::application::read_models::{
    EdgeView, Explanation, ExplanationReport, GraphView, PackageView, RequiredModuleView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use owo_colors::{OwoColorize, Style};

/// TextFormatter adapter rendering plain, line-oriented reports
///
/// Colors are only emitted when enabled; the CLI turns them off for
/// `--no-color`, for `--output` files and when stdout is not a terminal.
pub struct TextFormatter {
    color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn module(&self, name: &str) -> String {
        self.paint(name, Style::new().bold())
    }

    fn version(&self, version: &str) -> String {
        self.paint(version, Style::new().cyan())
    }

    fn required_line(&self, required: &RequiredModuleView) -> String {
        let mut line = format!(
            "- {} (local version: {})",
            self.module(&required.name),
            self.version(&required.local_version)
        );
        if let Some(latest) = &required.latest {
            line.push_str(&format!(
                " (last version: {})",
                self.paint(&latest.version, Style::new().green())
            ));
        }
        line
    }

    fn render_package(&self, output: &mut String, package: &PackageView) {
        output.push_str(&format!(
            "===== {} ({}) =====\n",
            self.module(&package.name),
            package.last_version
        ));

        for version in &package.versions {
            let extra = if version.is_last { " (last)" } else { "" };
            output.push_str(&format!(
                "\tVersion: {}{}\n",
                self.version(&version.version),
                extra
            ));

            if !version.parents.is_empty() {
                output.push_str("\t\t----- Parents -----\n");
                for parent in &version.parents {
                    output.push_str(&format!("\t\t{}\n", self.edge(parent)));
                }
            }

            if !version.deps.is_empty() {
                output.push_str("\t\t----- Deps -----\n");
                for dep in &version.deps {
                    output.push_str(&format!("\t\t{}\n", self.edge(dep)));
                }
            }
        }
    }

    /// Root parents carry no version, only an `(indirect)` marker
    fn edge(&self, edge: &EdgeView) -> String {
        if edge.is_root {
            let extra = if edge.is_indirect { " (indirect)" } else { "" };
            format!("{}{}", edge.name, extra)
        } else {
            format!("{} ({})", edge.name, edge.version)
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ReportFormatter for TextFormatter {
    fn format_explanation(&self, report: &ExplanationReport) -> Result<String> {
        let mut output = String::new();

        match &report.explanation {
            Explanation::Direct { module, root } => {
                output.push_str(&format!(
                    "'{}' is a direct dependency of the root module '{}', just run:\n",
                    self.module(module),
                    root
                ));
                output.push_str(&self.paint(&format!("go get {}", module), Style::new().green()));
                output.push('\n');
            }
            Explanation::Indirect {
                module,
                required_by,
                cycles,
            } => {
                output.push_str(&format!(
                    "to upgrade '{}' these packages must be upgraded:\n",
                    self.module(module)
                ));
                for required in required_by {
                    output.push_str(&self.required_line(required));
                    output.push('\n');
                }

                if !cycles.is_empty() {
                    output.push_str("dependency cycles skipped while walking parents:\n");
                    for cycle in cycles {
                        output.push_str(&format!(
                            "- {}\n",
                            self.paint(cycle, Style::new().yellow())
                        ));
                    }
                }
            }
        }

        if !report.lookup_failures.is_empty() {
            output.push_str("errors getting latest version of packages:\n");
            for failure in &report.lookup_failures {
                output.push_str(&format!(
                    "- {}\n",
                    self.paint(&failure.error, Style::new().red())
                ));
            }
        }

        Ok(output)
    }

    fn format_graph(&self, view: &GraphView) -> Result<String> {
        let mut output = String::new();
        for package in &view.packages {
            self.render_package(&mut output, package);
        }
        Ok(output)
    }
}
