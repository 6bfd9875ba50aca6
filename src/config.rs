use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub call: CallConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Upstream realtime speech API settings. The API key itself comes from the
/// `OPENAI_API_KEY` environment variable, not from this file.
#[derive(Debug, Deserialize)]
pub struct UpstreamConfig {
    pub api_base: String,
    pub model: String,
    pub voice: String,
    pub instructions: String,
}

/// Per-deployment call policy: session time limit, billing rate, and how
/// many recent calls the summary endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct CallConfig {
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
    #[serde(default = "default_cost_per_minute")]
    pub cost_per_minute: f64,
    #[serde(default = "default_recent_calls")]
    pub recent_calls: usize,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
            cost_per_minute: default_cost_per_minute(),
            recent_calls: default_recent_calls(),
        }
    }
}

fn default_max_duration_secs() -> u64 {
    300 // 5 minutes
}

fn default_cost_per_minute() -> f64 {
    0.30
}

fn default_recent_calls() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Call log backend: "jsonl" (file-based) or "memory"
    pub backend: String,
    #[serde(default = "default_log_path")]
    pub path: String,
}

fn default_log_path() -> String {
    "data/call-logs.jsonl".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
