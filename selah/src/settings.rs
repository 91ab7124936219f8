//! Service configuration.
//!
//! Values come from environment variables prefixed `SELAH_` (nested keys use
//! `__`), an optional file named by `SELAH_CONFIG`, and a `.env` file in the
//! working directory. Environment variables win over the file.
//!
//! ```rust
//! use selah::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.bind_address(), "0.0.0.0:5001");
//! assert_eq!(config.provider_configs()[0].id, "gemini");
//! ```

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use sprovider::{ProviderId, ProviderKind, ProviderSettings};

use crate::StartupError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

const ENV_PREFIX: &str = "SELAH";
const CONFIG_PATH_ENV: &str = "SELAH_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Provider used when a request names none or an unknown one. Defaults to
    /// the first configured provider.
    pub default_provider: Option<String>,
    /// Provider for structured scripture guidance. Defaults to the default
    /// provider.
    pub guidance_provider: Option<String>,
    /// Call-level timeout applied to every provider client.
    pub request_timeout_secs: u64,
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    pub providers: Vec<ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_provider: None,
            guidance_provider: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cors_origins: vec!["*".to_string()],
            providers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub id: String,
    /// Backend kind name. Falls back to `id`, so `{ "id": "groq" }` is enough
    /// for the built-in backends.
    pub kind: Option<String>,
    pub model: Option<String>,
    /// Takes precedence over the backend's API key environment variable.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    fn kind(&self) -> Result<ProviderKind, StartupError> {
        let name = self.kind.as_deref().unwrap_or(&self.id);
        Ok(ProviderKind::from_name(name, self.base_url.as_deref())?)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(config::File::with_name(&path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors_origins")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn from_json(document: &str) -> Result<Self, StartupError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Json))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured providers, or Gemini followed by Groq when none are listed.
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        if self.providers.is_empty() {
            return vec![ProviderConfig::new("gemini"), ProviderConfig::new("groq")];
        }
        self.providers.clone()
    }

    pub fn default_provider_id(&self) -> Option<ProviderId> {
        non_blank(self.default_provider.as_deref()).map(ProviderId::new)
    }

    pub fn guidance_provider_id(&self) -> Option<ProviderId> {
        non_blank(self.guidance_provider.as_deref()).map(ProviderId::new)
    }

    pub fn provider_settings(&self) -> Result<Vec<ProviderSettings>, StartupError> {
        self.provider_settings_with(|name| std::env::var(name).ok())
    }

    /// Resolves provider settings, reading fallback API keys through `lookup`.
    pub fn provider_settings_with<F>(&self, lookup: F) -> Result<Vec<ProviderSettings>, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.provider_configs()
            .iter()
            .map(|entry| {
                if entry.id.trim().is_empty() {
                    return Err(StartupError::config("provider entries require an id"));
                }

                let kind = entry.kind()?;
                let api_key = non_blank(entry.api_key.as_deref())
                    .map(str::to_string)
                    .or_else(|| {
                        kind.api_key_env()
                            .and_then(|name| lookup(name))
                            .filter(|key| !key.trim().is_empty())
                    });

                let mut settings = ProviderSettings::new(entry.id.as_str(), kind)
                    .with_timeout(self.request_timeout());
                if let Some(model) = non_blank(entry.model.as_deref()) {
                    settings = settings.with_model(model);
                }
                if let Some(api_key) = api_key {
                    settings = settings.with_api_key(api_key);
                }
                if let Some(temperature) = entry.temperature {
                    settings = settings.with_temperature(temperature);
                }
                if let Some(max_tokens) = entry.max_tokens {
                    settings = settings.with_max_tokens(max_tokens);
                }
                Ok(settings)
            })
            .collect()
    }

    pub fn validate(&self) -> Result<Vec<String>, StartupError> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    /// Returns warnings for a usable but degraded configuration and an error
    /// for one the service cannot start with.
    pub fn validate_with<F>(&self, lookup: F) -> Result<Vec<String>, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.request_timeout_secs == 0 {
            return Err(StartupError::config("request_timeout_secs must be positive"));
        }

        let settings = self.provider_settings_with(lookup)?;

        let mut seen = HashSet::new();
        for entry in &settings {
            if !seen.insert(entry.id.clone()) {
                return Err(StartupError::config(format!(
                    "provider '{}' is configured more than once",
                    entry.id
                )));
            }
        }

        for (field, id) in [
            ("default_provider", self.default_provider_id()),
            ("guidance_provider", self.guidance_provider_id()),
        ] {
            if let Some(id) = id
                && !seen.contains(&id)
            {
                return Err(StartupError::config(format!(
                    "{field} '{id}' is not a configured provider"
                )));
            }
        }

        let mut warnings = Vec::new();
        for entry in settings.iter().filter(|entry| entry.api_key.is_none()) {
            let hint = entry
                .kind
                .api_key_env()
                .map(|name| format!(" (set {name})"))
                .unwrap_or_default();
            warnings.push(format!(
                "provider '{}' has no API key{hint}; requests to it will fail",
                entry.id
            ));
        }
        if self.cors_origins.is_empty() {
            warnings.push("no CORS origins configured; browsers will block cross-origin calls".to_string());
        }

        Ok(warnings)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
