use hanabi_bot::BotParams;
use hanabi_core::game::state::{DEFAULT_LIVES, MAX_PLAYERS, MIN_PLAYERS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PLAYERS: usize = 2;
const DEFAULT_MAX_TURNS: u32 = 200;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root benchmark configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchmarkConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.outputs.validate(&self.run_id)?;
        validate_agents(&mut self.agents)?;
        self.metrics.validate(&self.agents)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Which games every agent plays.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_players")]
    pub players: usize,
    #[serde(default = "default_lives")]
    pub lives: u8,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ValidationError::InvalidField {
                field: "games.players".to_string(),
                message: format!("players must be between {MIN_PLAYERS} and {MAX_PLAYERS}"),
            });
        }

        if self.lives == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.lives".to_string(),
                message: "lives must be at least 1".to_string(),
            });
        }

        if self.max_turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.max_turns".to_string(),
                message: "turn limit must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn default_players() -> usize {
    DEFAULT_PLAYERS
}

fn default_lives() -> u8 {
    DEFAULT_LIVES
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

/// Definition of a tournament participant. Every seat of a game is filled
/// with this agent.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl AgentConfig {
    /// Sampling parameters for `bayesian` agents; unset keys fall back to
    /// the `HANABI_*` environment and then to built-in defaults.
    pub fn bot_params(&self) -> Result<BotParams, ValidationError> {
        let overrides: BayesianParams =
            serde_yaml::from_value(self.params.clone()).map_err(|err| {
                ValidationError::InvalidField {
                    field: format!("agents[{}].params", self.name),
                    message: err.to_string(),
                }
            })?;
        let defaults = BotParams::from_env();
        let params = BotParams {
            samples: overrides.samples.unwrap_or(defaults.samples),
            lives_weight: overrides.lives_weight.unwrap_or(defaults.lives_weight),
            tokens_weight: overrides.tokens_weight.unwrap_or(defaults.tokens_weight),
            seed: None,
        };
        if params.samples == 0 {
            return Err(ValidationError::InvalidField {
                field: format!("agents[{}].params.samples", self.name),
                message: "samples must be greater than zero".to_string(),
            });
        }
        for (label, weight) in [
            ("lives_weight", params.lives_weight),
            ("tokens_weight", params.tokens_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValidationError::InvalidField {
                    field: format!("agents[{}].params.{label}", self.name),
                    message: "weight must be a non-negative number".to_string(),
                });
            }
        }
        Ok(params)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BayesianParams {
    samples: Option<usize>,
    lives_weight: Option<f64>,
    tokens_weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Bayesian,
    RuleBased,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Metrics configuration block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Agent the summary compares everyone else against.
    #[serde(default)]
    pub baseline: Option<String>,
}

impl MetricsConfig {
    fn validate(&self, agents: &[AgentConfig]) -> Result<(), ValidationError> {
        if let Some(baseline) = self.baseline.as_ref() {
            if !agents.iter().any(|a| &a.name == baseline) {
                return Err(ValidationError::InvalidField {
                    field: "metrics.baseline".to_string(),
                    message: format!("baseline agent '{baseline}' is not defined in agents list"),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_agents(agents: &mut [AgentConfig]) -> Result<(), ValidationError> {
    if agents.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "agents".to_string(),
            message: "at least one agent must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for agent in agents.iter_mut() {
        if agent.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "agents.name".to_string(),
                message: "agent name must not be empty".to_string(),
            });
        }

        if !agent.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("agents[{}].name", agent.name),
                message: "agent name contains invalid characters".to_string(),
            });
        }

        if !seen.insert(agent.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "agents".to_string(),
                message: format!("agent name '{}' defined more than once", agent.name),
            });
        }

        if agent.params.is_null() {
            agent.params = serde_yaml::Value::Mapping(Default::default());
        }

        match agent.kind {
            AgentKind::Bayesian => {
                agent.bot_params()?;
            }
            AgentKind::RuleBased => {}
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
