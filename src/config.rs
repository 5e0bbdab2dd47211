use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub assistant: AssistantSettings,
    pub followup: FollowUpSettings,
    pub calendly: CalendlySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String { "gpt-4-turbo-preview".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpSettings {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendlySettings {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub match_threshold: Option<u8>,
    pub analysis_concurrency: Option<usize>,
    pub default_recommendations: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_response_time_weight")]
    pub response_time: f64,
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
    #[serde(default = "default_property_interest_weight")]
    pub property_interest: f64,
    #[serde(default = "default_budget_alignment_weight")]
    pub budget_alignment: f64,
    #[serde(default = "default_timeline_weight")]
    pub timeline: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            response_time: default_response_time_weight(),
            engagement: default_engagement_weight(),
            property_interest: default_property_interest_weight(),
            budget_alignment: default_budget_alignment_weight(),
            timeline: default_timeline_weight(),
        }
    }
}

fn default_response_time_weight() -> f64 { 0.30 }
fn default_engagement_weight() -> f64 { 0.20 }
fn default_property_interest_weight() -> f64 { 0.20 }
fn default_budget_alignment_weight() -> f64 { 0.15 }
fn default_timeline_weight() -> f64 { 0.15 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with HAVEN_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with HAVEN_)
            // e.g., HAVEN_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HAVEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply unprefixed vendor API keys when present
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HAVEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Fall back to the vendor-conventional environment variable names for the
/// collaborator API keys
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let assistant_key = env::var("OPENAI_API_KEY").ok();
    let followup_key = env::var("FOLLOWUPBOSS_API_KEY").ok();
    let calendly_key = env::var("CALENDLY_API_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = assistant_key {
        builder = builder.set_override("assistant.api_key", key)?;
    }
    if let Some(key) = followup_key {
        builder = builder.set_override("followup.api_key", key)?;
    }
    if let Some(key) = calendly_key {
        builder = builder.set_override("calendly.api_key", key)?;
    }

    builder.build()
}
