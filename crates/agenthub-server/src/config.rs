use serde::Deserialize;

use agenthub_core::cost::DEFAULT_BUDGET;
use agenthub_core::playground::DEFAULT_HISTORY_LIMIT;

/// Top-level server configuration, loaded from `agenthub.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    /// `text` or `json`.
    pub log_format: String,
    pub limits: LimitsConfig,
    pub playground: PlaygroundConfig,
    pub incidents: IncidentsConfig,
    pub costs: CostsConfig,
    pub wizard: WizardConfig,
    pub onboarding: OnboardingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            web_root: "web".to_string(),
            log_format: "text".to_string(),
            limits: LimitsConfig::default(),
            playground: PlaygroundConfig::default(),
            incidents: IncidentsConfig::default(),
            costs: CostsConfig::default(),
            wizard: WizardConfig::default(),
            onboarding: OnboardingConfig::default(),
        }
    }
}

/// Infrastructure limits (subscriber caps, buffer sizes, timeouts).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_sse_subscribers: usize,
    pub max_stored_events: usize,
    /// Toasts queued behind the visible ones; the oldest are dropped beyond it.
    pub max_pending_notifications: usize,
    pub broadcast_capacity: usize,
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sse_subscribers: 100,
            max_stored_events: 500,
            max_pending_notifications: 100,
            broadcast_capacity: 1024,
            request_timeout_secs: 30,
        }
    }
}

/// Simulated prompt runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub simulated_latency_ms: u64,
    pub default_model: String,
    pub history_limit: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 2000,
            default_model: "gpt-3.5-turbo".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IncidentsConfig {
    pub rollback_duration_ms: u64,
}

impl Default for IncidentsConfig {
    fn default() -> Self {
        Self {
            rollback_duration_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CostsConfig {
    pub monthly_budget: f64,
}

impl Default for CostsConfig {
    fn default() -> Self {
        Self {
            monthly_budget: DEFAULT_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Require every agent to be named before leaving the registry step.
    pub strict_validation: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// JSON file holding client flags. In-memory only when unset.
    pub flag_path: Option<String>,
}

impl ServerConfig {
    /// Check the configuration. Returns one message per problem; empty when
    /// the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!(
                "listen_addr {:?} is not a valid socket address",
                self.listen_addr
            ));
        }
        if !matches!(self.log_format.as_str(), "text" | "json") {
            problems.push(format!(
                "log_format must be \"text\" or \"json\", got {:?}",
                self.log_format
            ));
        }

        if self.limits.max_sse_subscribers == 0 {
            problems.push("limits.max_sse_subscribers must be > 0".to_string());
        }
        if self.limits.max_stored_events == 0 {
            problems.push("limits.max_stored_events must be > 0".to_string());
        }
        if self.limits.broadcast_capacity == 0 {
            problems.push("limits.broadcast_capacity must be > 0".to_string());
        }
        if self.limits.request_timeout_secs == 0 {
            problems.push("limits.request_timeout_secs must be > 0".to_string());
        }

        if self.playground.history_limit == 0 {
            problems.push("playground.history_limit must be > 0".to_string());
        }
        if self.playground.default_model.trim().is_empty() {
            problems.push("playground.default_model must not be empty".to_string());
        }

        if !self.costs.monthly_budget.is_finite() || self.costs.monthly_budget < 0.0 {
            problems.push("costs.monthly_budget must be a non-negative number".to_string());
        }

        problems
    }

    /// Load config from `agenthub.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        Self::load_from("agenthub.toml")
    }

    pub fn load_from(path: &str) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                ServerConfig::default()
            },
        };
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("AGENTHUB_LISTEN_ADDR")
            && !addr.is_empty()
        {
            self.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("AGENTHUB_WEB_ROOT")
            && !root.is_empty()
        {
            self.web_root = root;
        }
        if let Ok(format) = std::env::var("AGENTHUB_LOG_FORMAT")
            && !format.is_empty()
        {
            self.log_format = format;
        }
        if let Ok(path) = std::env::var("AGENTHUB_FLAG_PATH")
            && !path.is_empty()
        {
            self.onboarding.flag_path = Some(path);
        }

        if let Ok(val) = std::env::var("AGENTHUB_MAX_SSE_SUBSCRIBERS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.max_sse_subscribers = n;
        }
        if let Ok(val) = std::env::var("AGENTHUB_MAX_STORED_EVENTS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.max_stored_events = n;
        }
        if let Ok(val) = std::env::var("AGENTHUB_MAX_PENDING_NOTIFICATIONS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.max_pending_notifications = n;
        }
        if let Ok(val) = std::env::var("AGENTHUB_PLAYGROUND_LATENCY_MS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.playground.simulated_latency_ms = n;
        }
        if let Ok(val) = std::env::var("AGENTHUB_ROLLBACK_DURATION_MS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.incidents.rollback_duration_ms = n;
        }
        if let Ok(val) = std::env::var("AGENTHUB_MONTHLY_BUDGET")
            && let Ok(n) = val.parse::<f64>()
        {
            self.costs.monthly_budget = n;
        }
        if let Ok(val) = std::env::var("AGENTHUB_STRICT_WIZARD")
            && let Ok(b) = val.parse::<bool>()
        {
            self.wizard.strict_validation = b;
        }
    }
}
