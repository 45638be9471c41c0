use std::fmt::Display;

use itertools::Itertools;

use crate::prelude::*;

/// Fill color of the initial state in Mermaid diagrams.
pub const MERMAID_INITIAL_FILL: &str = "#1c98b6";

/// Quotes `name` so that it can be used as an identifier in the DOT format.
fn quote_dot_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Mermaid node ids may only consist of alphanumeric characters and underscores.
fn sanitize_mermaid_ident(name: &str) -> String {
    name.chars()
        .map(|chr| match chr {
            c if c.is_alphanumeric() => c,
            _ => '_',
        })
        .collect()
}

/// Enum that abstracts attributes of states in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
    /// The fill color of a node
    Color(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label={}", quote_dot_ident(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
            DotStateAttribute::Color(c) => write!(f, "style=filled, fillcolor=\"{c}\""),
        }
    }
}

/// Enum that abstracts attributes of transitions in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label={}", quote_dot_ident(lbl)),
        }
    }
}

impl Machine {
    fn dot_state_attributes(&self, state: &Symbol) -> Vec<DotStateAttribute> {
        let mut attributes = vec![
            DotStateAttribute::Label(state.label().to_string()),
            DotStateAttribute::Shape("circle".into()),
        ];
        if state == self.initial() {
            attributes.push(DotStateAttribute::Color("lightblue".into()));
        }
        attributes
    }

    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    ///
    /// Every state becomes a circular node, the initial state is filled and additionally
    /// pointed to by an edge from an invisible node. Transitions are labelled `input|output`.
    /// Transitions for which the transition function fails are left out.
    pub fn dot_representation(&self) -> String {
        let header = [
            "digraph M {".to_string(),
            "init [label=\"\", shape=none]".to_string(),
            format!("init -> {}", quote_dot_ident(self.initial().label())),
        ];

        let states = self.states().iter().map(|q| {
            format!(
                "{} [{}]",
                quote_dot_ident(q.label()),
                self.dot_state_attributes(q)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let transitions = self.states().iter().flat_map(|q| {
            self.input_alphabet().iter().filter_map(move |sym| {
                let (target, output) = self.transition(q, sym).ok()?;
                Some(format!(
                    "{} -> {} [{}]",
                    quote_dot_ident(q.label()),
                    quote_dot_ident(target.label()),
                    DotTransitionAttribute::Label(format!("{sym}|{output}"))
                ))
            })
        });

        header
            .into_iter()
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Compute a [Mermaid](https://mermaid.js.org/) flowchart of the machine. States are drawn as
    /// circles, the initial state is filled with [`MERMAID_INITIAL_FILL`] and transitions are
    /// labelled `input/output`.
    pub fn mermaid_representation(&self) -> String {
        let header = [
            "graph TD".to_string(),
            format!(
                "\tstyle {} fill:{MERMAID_INITIAL_FILL}",
                sanitize_mermaid_ident(self.initial().label())
            ),
        ];
        let body = self.states().iter().flat_map(|q| {
            let id = sanitize_mermaid_ident(q.label());
            let node = format!("\t{id}((\"{}\"))", q.label());
            let edges = self.input_alphabet().iter().filter_map(move |sym| {
                let (target, output) = self.transition(q, sym).ok()?;
                Some(format!(
                    "\t{} -->|{sym}/{output}| {}",
                    sanitize_mermaid_ident(q.label()),
                    sanitize_mermaid_ident(target.label())
                ))
            });
            std::iter::once(node).chain(edges)
        });
        header.into_iter().chain(body).join("\n")
    }

    /// Renders the machine as a PNG by piping its [dot representation](Machine::dot_representation)
    /// through the `dot` binary and returns the bytes of the rendered image. This method is only
    /// available on the `graphviz` crate feature and requires graphviz to be installed.
    #[cfg(feature = "graphviz")]
    pub fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        let dot = self.dot_representation();
        run_dot(std::process::Command::new("dot").arg("-Tpng"), Some(&dot))
    }

    /// Renders the machine into a PNG file called `filename`. The dot representation is first
    /// written to a temporary file, which is then handed to the `dot` binary. Only available on
    /// the `graphviz` crate feature.
    #[cfg(feature = "graphviz")]
    pub fn render_to_file_name(&self, filename: &str) -> Result<(), std::io::Error> {
        use std::io::Write;

        let mut source = tempfile::NamedTempFile::new()?;
        source.write_all(self.dot_representation().as_bytes())?;
        source.flush()?;

        run_dot(
            std::process::Command::new("dot")
                .arg("-Tpng")
                .arg("-o")
                .arg(filename)
                .arg(source.path()),
            None,
        )?;
        Ok(())
    }
}

/// Runs a prepared `dot` command, optionally feeding `input` on stdin, and returns what it
/// wrote to stdout. A nonzero exit status becomes an error carrying the diagnostics of `dot`.
#[cfg(feature = "graphviz")]
fn run_dot(
    command: &mut std::process::Command,
    input: Option<&str>,
) -> Result<Vec<u8>, std::io::Error> {
    use std::{io::Write, process::Stdio};

    use tracing::{error, trace};

    trace!("running {command:?}");
    let mut child = command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let diagnostics = String::from_utf8_lossy(&output.stderr);
        error!("dot exited with {}: {}", output.status, diagnostics.trim());
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("dot exited with {}: {}", output.status, diagnostics.trim()),
        ));
    }
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::toggle;

    #[test]
    fn dot_attributes() {
        assert_eq!(
            DotStateAttribute::Label("say \"hi\"".into()).to_string(),
            "label=\"say \\\"hi\\\"\""
        );
        assert_eq!(
            DotTransitionAttribute::Label("a|0".into()).to_string(),
            "label=\"a|0\""
        );
    }

    #[test]
    fn dot_representation() {
        let dot = toggle().dot_representation();
        let lines: Vec<_> = dot.lines().collect();
        assert_eq!(lines.first(), Some(&"digraph M {"));
        assert_eq!(lines.last(), Some(&"}"));
        assert!(lines.contains(&"init -> \"q0\""));
        assert!(lines.contains(&"\"q0\" -> \"q1\" [label=\"a|0\"]"));
        assert!(lines.contains(&"\"q1\" -> \"q1\" [label=\"b|0\"]"));
        assert!(dot.contains("fillcolor"));
        assert_eq!(lines.iter().filter(|l| l.contains("label=\"b|")).count(), 2);
    }

    #[test]
    fn mermaid_representation() {
        let prod = toggle().product(&toggle()).unwrap();
        let mermaid = prod.mermaid_representation();
        let lines: Vec<_> = mermaid.lines().collect();
        assert_eq!(lines[0], "graph TD");
        assert_eq!(lines[1], format!("\tstyle q0_q0 fill:{MERMAID_INITIAL_FILL}"));
        assert!(lines.contains(&"\tq0_q1((\"q0_q1\"))"));
        assert!(lines.contains(&"\tq0_q0 -->|a/0_0| q1_q1"));
        assert_eq!(lines.iter().filter(|l| l.contains("-->")).count(), 8);
    }

    #[cfg(feature = "graphviz")]
    #[test_log::test]
    fn rendering_into_a_missing_directory_fails() {
        let target = std::env::temp_dir()
            .join("mealy-missing-directory")
            .join("nested")
            .join("toggle.png");
        let res = toggle().render_to_file_name(&target.to_string_lossy());
        assert!(res.is_err());
        assert!(!target.exists());
    }

    #[cfg(feature = "graphviz")]
    #[test]
    fn render_produces_png_or_reports_missing_dot() {
        match toggle().render() {
            Ok(bytes) => assert!(bytes.starts_with(b"\x89PNG")),
            Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        }
    }

    #[test]
    fn mermaid_ids_are_sanitized() {
        assert_eq!(sanitize_mermaid_ident("q 0-(1)"), "q_0__1_");
    }
}
