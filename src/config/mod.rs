//! Configuration file handling for pim
//!
//! `pim.yaml` declares named sources (local directories or fetchable
//! references) and named targets (an output location, an assembly strategy
//! and the includes that feed it). Loading normalizes the raw file into an
//! immutable [`Config`]:
//! - the implicit `working_dir` source is injected unless already declared
//! - raw include strings are resolved into one [`Include`] per pattern
//! - omitted strategies are inferred from the output extension
//!
//! Validation fails fast; no partially normalized config is ever returned.

pub mod include;

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, config};

pub use include::{Include, parse_include};

/// Name of the implicit source pointing at the project directory
pub const WORKING_DIR_SOURCE: &str = "working_dir";

/// Config file names probed in the project directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["pim.yaml", ".pim.yaml"];

const SUPPORTED_VERSION: u32 = 1;

/// A named location files are selected from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: String,

    /// Local directory path or fetchable reference (git URL, archive URL)
    #[serde(default)]
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// How a target's matched files are assembled into its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Copy basenames into the output directory
    Flatten,
    /// Copy with paths relative to the source root into the output directory
    Preserve,
    /// Append every file into a single output file behind a generation marker
    Concat,
}

impl StrategyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "flatten" => Some(Self::Flatten),
            "preserve" => Some(Self::Preserve),
            "concat" => Some(Self::Concat),
            _ => None,
        }
    }

    /// Strategy used when a target does not name one: `.md` and `.txt`
    /// outputs are concatenated, anything else is flattened.
    pub fn infer(output: &Path) -> Self {
        match output.extension().and_then(|ext| ext.to_str()) {
            Some("md" | "txt") => Self::Concat,
            _ => Self::Flatten,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flatten => "flatten",
            Self::Preserve => "preserve",
            Self::Concat => "concat",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized output target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,

    /// Output path as declared (relative paths are resolved by the installer)
    pub output: PathBuf,

    pub strategy: StrategyKind,

    /// One entry per pattern, in declaration order
    pub includes: Vec<Include>,
}

/// Normalized, validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub version: u32,
    pub sources: Vec<Source>,
    pub targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    sources: Vec<Source>,

    #[serde(default)]
    targets: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(default)]
    name: String,

    #[serde(default)]
    output: String,

    #[serde(default)]
    strategy: Option<String>,

    #[serde(default)]
    include: Vec<String>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

impl Config {
    /// Locate the config file in a project directory
    pub fn find(project_dir: &Path) -> Result<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                config::not_found(format!(
                    "{} (looked for {})",
                    project_dir.display(),
                    CONFIG_FILE_NAMES.join(", ")
                ))
            })
    }

    /// Read, normalize and validate a config file
    ///
    /// `working_dir` becomes the url of the implicit `working_dir` source.
    pub fn load(path: &Path, working_dir: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;

        let raw: RawConfig = serde_yaml::from_str(&yaml)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), "loaded configuration file");
        Self::from_raw(raw, working_dir)
    }

    /// Parse, normalize and validate config from a YAML string
    pub fn from_yaml(yaml: &str, working_dir: &Path) -> Result<Self> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw, working_dir)
    }

    fn from_raw(raw: RawConfig, working_dir: &Path) -> Result<Self> {
        if raw.version != SUPPORTED_VERSION {
            warn!(
                version = raw.version,
                "unknown config version, reading it as version {SUPPORTED_VERSION}"
            );
        }

        let mut sources = raw.sources;
        if !sources.iter().any(|s| s.name == WORKING_DIR_SOURCE) {
            let url = working_dir.to_string_lossy().into_owned();
            sources.insert(0, Source::new(WORKING_DIR_SOURCE, url));
        }

        let targets = raw
            .targets
            .into_iter()
            .map(normalize_target)
            .collect::<Result<Vec<_>>>()?;

        let config = Self {
            version: raw.version,
            sources,
            targets,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every loaded config satisfies
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.is_empty() {
                return Err(config::invalid("source name cannot be empty"));
            }
            if source.name.contains('/') {
                return Err(config::invalid(format!(
                    "source name '{}' cannot contain '/'",
                    source.name
                )));
            }
            // Names double as scratch directory names
            if matches!(source.name.as_str(), "." | "..") || source.name.contains('\\') {
                return Err(config::invalid(format!(
                    "invalid source name: {}",
                    source.name
                )));
            }
            if source.url.trim().is_empty() {
                return Err(config::invalid(format!(
                    "source '{}' has no url",
                    source.name
                )));
            }
            if !names.insert(source.name.as_str()) {
                return Err(config::invalid(format!(
                    "duplicate source name: {}",
                    source.name
                )));
            }
        }

        for target in &self.targets {
            if target.output.as_os_str().is_empty() {
                return Err(config::invalid(format!(
                    "target '{}' has no output path",
                    target.name
                )));
            }
            for include in &target.includes {
                if !names.contains(include.source.as_str()) {
                    return Err(config::invalid(format!(
                        "target '{}' references unknown source: {}",
                        target.name, include.source
                    )));
                }
            }
        }

        Ok(())
    }
}

fn normalize_target(raw: RawTarget) -> Result<Target> {
    let output = PathBuf::from(&raw.output);

    let strategy = match raw.strategy.as_deref() {
        None | Some("") => StrategyKind::infer(&output),
        Some(value) => StrategyKind::parse(value).ok_or_else(|| {
            config::invalid(format!(
                "target '{}' has invalid strategy: {value} (must be 'flatten', 'preserve', or 'concat')",
                raw.name
            ))
        })?,
    };

    let mut includes = Vec::new();
    for raw_include in &raw.include {
        let spec = parse_include(raw_include)?;
        let source = spec
            .source
            .unwrap_or_else(|| WORKING_DIR_SOURCE.to_string());
        includes.extend(spec.patterns.into_iter().map(|pattern| Include {
            source: source.clone(),
            pattern,
        }));
    }

    Ok(Target {
        name: raw.name,
        output,
        strategy,
        includes,
    })
}
