//! Error message formatting with actionable suggestions.

use std::error::Error;

use deuterium_core::error::DeuteriumError;
use deuterium_graph::DependencyGraph;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &DeuteriumError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }

    /// Describe the nodes of a cycle error by name
    pub fn format_cycle(&self, error: &DeuteriumError, graph: &DependencyGraph) -> Option<String> {
        let nodes = error.cycle_nodes()?;
        let names = graph
            .nodes_by_id(nodes)
            .into_iter()
            .map(|node| self.colors.bold(&node.name))
            .collect::<Vec<_>>()
            .join(", ");

        Some(format!("{}: {}", self.colors.yellow("cycle"), names))
    }

    /// Format a simple error message
    pub fn format_simple(&self, message: &str) -> String {
        format!("{}: {}", self.colors.red("error"), message)
    }

    /// Format a warning message
    pub fn format_warning(&self, message: &str) -> String {
        format!("{}: {}", self.colors.yellow("warning"), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deuterium_core::{Node, NodeId};

    fn plain() -> ErrorFormatter {
        ErrorFormatter::with_colors(ColorSupport::disabled())
    }

    #[test]
    fn test_format_error_includes_help() {
        let error = DeuteriumError::NodeNameNotFound {
            name: "Z".to_string(),
        };
        let text = plain().format_error(&error);
        assert!(text.starts_with("error: No node named 'Z'"));
        assert!(text.contains("help: Run 'deuterium show'"));
    }

    #[test]
    fn test_format_error_includes_source() {
        let error = DeuteriumError::io(
            "Failed to read plan.json".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let text = plain().format_error(&error);
        assert!(text.contains("caused by: no such file"));
    }

    #[test]
    fn test_format_cycle_uses_names() {
        let mut graph = DependencyGraph::new("g");
        let (a, b) = (Node::new("A"), Node::new("B"));
        graph.put_edge(&a, &b);
        graph.put_edge(&b, &a);

        let error = DeuteriumError::cycle([a.id, b.id]);
        let text = plain().format_cycle(&error, &graph).unwrap();
        assert!(text.starts_with("cycle: "));
        assert!(text.contains('A') && text.contains('B'));

        let other = DeuteriumError::NodeNotFound { id: NodeId::new() };
        assert!(plain().format_cycle(&other, &graph).is_none());
    }

    #[test]
    fn test_format_simple_and_warning() {
        assert_eq!(plain().format_simple("bad"), "error: bad");
        assert_eq!(plain().format_warning("odd"), "warning: odd");
    }
}
