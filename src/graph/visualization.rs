// Mon Oct 19 2026 - Alex

use crate::graph::{RenderError, RenderSet};
use log::info;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_RASTERIZER: &str = "dot";

/// Writes a pruned graph as GraphViz DOT.
#[derive(Debug, Clone)]
pub struct DotWriter {
    title: String,
    nodesep: f32,
    ranksep: f32,
    node_fontsize: u32,
    edge_fontsize: u32,
}

impl DotWriter {
    pub fn new() -> Self {
        Self {
            title: "G".to_string(),
            nodesep: 0.2,
            ranksep: 0.3,
            node_fontsize: 9,
            edge_fontsize: 8,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn write<W: Write>(&self, set: &RenderSet, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "digraph {} {{", self.title)?;
        writeln!(w, "nodesep = {}", self.nodesep)?;
        writeln!(w, "ranksep = {}", self.ranksep)?;
        writeln!(w, "node [fontsize={}]", self.node_fontsize)?;
        writeln!(w, "edge [fontsize={}]", self.edge_fontsize)?;

        for edge in &set.edges {
            writeln!(
                w,
                "{} -> {} [label=\" {:.1}\"]",
                edge.src.as_u64(),
                edge.dst.as_u64(),
                edge.kilobytes()
            )?;
        }

        for node in &set.nodes {
            let id = node.address.as_u64();
            writeln!(
                w,
                "{} [label=\"{}\\n{}\",shape=box,href=\"{}\"]",
                id,
                escape_label(&node.label),
                escape_label(&node.size_label),
                id
            )?;
        }

        writeln!(w, "}}")?;
        Ok(())
    }

    pub fn to_dot(&self, set: &RenderSet) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(set, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Default for DotWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Pipes DOT text through `program -Tpng` and writes the image to `output`.
pub fn render_png(dot: &str, output: &Path, program: &str) -> Result<(), RenderError> {
    info!("rasterizing graph to {}", output.display());

    let mut child = Command::new(program)
        .arg("-Tpng")
        .arg(format!("-o{}", output.display()))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RenderError::Spawn {
            program: program.to_string(),
            source: e,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot.as_bytes())?;
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        return Err(RenderError::RasterizerFailed {
            program: program.to_string(),
            status: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    Ok(())
}
