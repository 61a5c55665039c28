//! Configuration file support
//!
//! Settings come from three layers, highest precedence first:
//! command-line flags (and their `ONEPAGER_*` environment variables),
//! the TOML config file, then built-in defaults.
//!
//! ```toml
//! sheet = "status.json"
//! notes = "notes.txt"
//! tone = "executive"
//! emphasis = "budget"
//! format = "markdown"
//!
//! [columns]
//! key_result = "Key Result"
//! status = "Status"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use onepager_core::{ColumnMapping, ReportRequest, Tone};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "onepager.toml";

/// Output document format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Slides,
    Json,
}

/// One settings layer. Every field is optional so layers can be merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sheet export (JSON) to summarize
    pub sheet: Option<PathBuf>,
    /// Meeting notes text file
    pub notes: Option<PathBuf>,
    pub tone: Option<String>,
    pub custom_tone: Option<String>,
    pub emphasis: Option<String>,
    pub format: Option<OutputFormat>,
    /// Wrap width for text output
    pub wrap: Option<usize>,
    pub columns: ColumnMapping,
}

impl Config {
    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file. Relative paths inside it resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let config =
            Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Load `explicit` if given, else `onepager.toml` in `dir` if present, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        self.sheet = self.sheet.map(rebase);
        self.notes = self.notes.map(rebase);
        self
    }

    /// Overlay `over` on top of `self`; values set in `over` win
    pub fn merge(self, over: Config) -> Self {
        Self {
            sheet: over.sheet.or(self.sheet),
            notes: over.notes.or(self.notes),
            tone: over.tone.or(self.tone),
            custom_tone: over.custom_tone.or(self.custom_tone),
            emphasis: over.emphasis.or(self.emphasis),
            format: over.format.or(self.format),
            wrap: over.wrap.or(self.wrap),
            columns: self.columns.merge(over.columns),
        }
    }

    pub fn tone(&self) -> Tone {
        self.tone.as_deref().map(Tone::from_key).unwrap_or_default()
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Report options for this configuration, with `notes` as the meeting notes
    pub fn to_request(&self, notes: String) -> ReportRequest {
        ReportRequest::new()
            .mapping(self.columns.clone())
            .tone(self.tone())
            .custom_tone(self.custom_tone.clone().unwrap_or_default())
            .emphasis(self.emphasis.clone().unwrap_or_default())
            .notes(notes)
    }
}
