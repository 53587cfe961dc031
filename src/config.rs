// Mon Oct 19 2026 - Alex

use crate::graph::DEFAULT_RASTERIZER;
use crate::symbol::cppfilt::DEFAULT_PROGRAM;
use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DemanglerKind {
    Builtin,
    #[value(name = "cppfilt")]
    CppFilt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keep_count: usize,
    pub min_edge_kb: u64,
    pub demangler: DemanglerKind,
    pub cppfilt_program: String,
    pub include_leftover: bool,
    pub graph_title: String,
    pub rasterizer_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keep_count: 100,
            min_edge_kb: 30,
            demangler: DemanglerKind::Builtin,
            cppfilt_program: DEFAULT_PROGRAM.to_string(),
            include_leftover: false,
            graph_title: "G".to_string(),
            rasterizer_program: DEFAULT_RASTERIZER.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn with_keep_count(mut self, keep_count: usize) -> Self {
        self.keep_count = keep_count;
        self
    }

    pub fn with_min_edge_kb(mut self, min_edge_kb: u64) -> Self {
        self.min_edge_kb = min_edge_kb;
        self
    }

    pub fn with_demangler(mut self, demangler: DemanglerKind) -> Self {
        self.demangler = demangler;
        self
    }

    pub fn with_leftover(mut self, include: bool) -> Self {
        self.include_leftover = include;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.demangler == DemanglerKind::CppFilt && self.cppfilt_program.trim().is_empty() {
            return Err("cppfilt_program must be set when using the cppfilt demangler".to_string());
        }
        if self.graph_title.contains('"') {
            return Err("graph_title must not contain quotes".to_string());
        }
        Ok(())
    }
}
