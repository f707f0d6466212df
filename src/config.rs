// Configuration for the demo runner
//
// Loaded in order of precedence:
// 1. File named by the PATTERNS_CONFIG environment variable
// 2. File passed explicitly by the caller
// 3. Built-in defaults
//
// Every field is optional in the file; missing ones keep their defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PatternError, Result};
use crate::structural::flyweight::{default_seed, SharedState};

pub const CONFIG_ENV: &str = "PATTERNS_CONFIG";

/// Config files and the command line accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PatternKind {
    ChainOfResponsibility,
    Iterator,
    Memento,
    Observer,
    Visitor,
    Mediator,
    State,
    AbstractFactory,
    FactoryMethod,
    Singleton,
    Adapter,
    Bridge,
    Composite,
    Flyweight,
    Proxy,
}

impl PatternKind {
    pub const ALL: [PatternKind; 15] = [
        Self::ChainOfResponsibility,
        Self::Iterator,
        Self::Memento,
        Self::Observer,
        Self::Visitor,
        Self::Mediator,
        Self::State,
        Self::AbstractFactory,
        Self::FactoryMethod,
        Self::Singleton,
        Self::Adapter,
        Self::Bridge,
        Self::Composite,
        Self::Flyweight,
        Self::Proxy,
    ];

    /// Same spelling as in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChainOfResponsibility => "chain-of-responsibility",
            Self::Iterator => "iterator",
            Self::Memento => "memento",
            Self::Observer => "observer",
            Self::Visitor => "visitor",
            Self::Mediator => "mediator",
            Self::State => "state",
            Self::AbstractFactory => "abstract-factory",
            Self::FactoryMethod => "factory-method",
            Self::Singleton => "singleton",
            Self::Adapter => "adapter",
            Self::Bridge => "bridge",
            Self::Composite => "composite",
            Self::Flyweight => "flyweight",
            Self::Proxy => "proxy",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| PatternError::UnknownPattern(s.to_string()))
    }
}

impl TryFrom<String> for PatternKind {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MementoConfig {
    pub initial_state: String,
    pub generated_len: usize,
}

impl Default for MementoConfig {
    fn default() -> Self {
        Self {
            initial_state: "Super-duper-super-puper-super.".to_string(),
            generated_len: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlyweightConfig {
    pub seed: Vec<SharedState>,
}

impl Default for FlyweightConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    /// One racing thread per value.
    pub values: Vec<String>,
    /// Simulated slow start of each thread, demo only.
    pub startup_delay_ms: u64,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        Self {
            values: vec!["FOO".to_string(), "BAR".to_string()],
            startup_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub patterns: Vec<PatternKind>,
    pub log_level: String,
    pub memento: MementoConfig,
    pub flyweight: FlyweightConfig,
    pub singleton: SingletonConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            patterns: PatternKind::ALL.to_vec(),
            log_level: "warn".to_string(),
            memento: MementoConfig::default(),
            flyweight: FlyweightConfig::default(),
            singleton: SingletonConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PatternError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Applies the precedence rules above.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_path(from_env, explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn resolve_path(from_env: Option<PathBuf>, explicit: Option<&Path>) -> Option<PathBuf> {
    from_env.or_else(|| explicit.map(Path::to_path_buf))
}
