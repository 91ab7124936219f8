//! Provider construction from plain settings values.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use scommon::GenerationOptions;

use crate::adapters::openai_compat::{CompatHttpTransport, CompatibleProvider};
use crate::{CredentialStore, ModelProvider, ProviderError, ProviderId, ProviderRegistry};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Groq,
    OpenAiCompatible { base_url: String },
}

impl ProviderKind {
    /// Maps a configured kind name. `openai_compatible` needs a base URL.
    pub fn from_name(name: &str, base_url: Option<&str>) -> Result<Self, ProviderError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "groq" => Ok(Self::Groq),
            "openai_compatible" | "openai-compatible" | "openai" => {
                let base_url = base_url
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| {
                        ProviderError::invalid_request(
                            "openai_compatible providers require a base_url",
                        )
                    })?;
                Ok(Self::OpenAiCompatible {
                    base_url: base_url.to_string(),
                })
            }
            other => Err(ProviderError::invalid_request(format!(
                "unknown provider kind '{other}'"
            ))),
        }
    }

    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            #[cfg(feature = "provider-gemini")]
            Self::Gemini => Some(crate::adapters::gemini::GEMINI_API_KEY_ENV),
            #[cfg(feature = "provider-groq")]
            Self::Groq => Some(crate::adapters::groq::GROQ_API_KEY_ENV),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub id: ProviderId,
    pub kind: ProviderKind,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn new(id: impl Into<ProviderId>, kind: ProviderKind) -> Self {
        Self {
            id: id.into(),
            kind,
            model: None,
            api_key: None,
            temperature: None,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn gemini() -> Self {
        Self::new("gemini", ProviderKind::Gemini)
    }

    pub fn groq() -> Self {
        Self::new("groq", ProviderKind::Groq)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn defaults(&self) -> GenerationOptions {
        let mut defaults = GenerationOptions::default()
            .with_temperature(self.temperature.unwrap_or(DEFAULT_TEMPERATURE));
        if let Some(max_tokens) = self.max_tokens {
            defaults = defaults.with_max_tokens(max_tokens);
        }
        defaults
    }
}

/// Builds one provider. A missing API key does not fail here; the provider
/// reports an authentication error when it is first invoked.
pub fn build_provider(
    settings: &ProviderSettings,
    credentials: Arc<CredentialStore>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let http = Client::builder()
        .timeout(settings.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    match &settings.kind {
        ProviderKind::Gemini => build_gemini_provider(settings, credentials, http),
        ProviderKind::Groq => build_groq_provider(settings, credentials, http),
        ProviderKind::OpenAiCompatible { base_url } => {
            let model = settings.model.clone().ok_or_else(|| {
                ProviderError::invalid_request(format!(
                    "provider '{}' requires a model",
                    settings.id
                ))
            })?;
            let transport = Arc::new(CompatHttpTransport::new(http, base_url.clone()));
            Ok(Arc::new(
                CompatibleProvider::new(settings.id.clone(), credentials, transport, model)
                    .with_defaults(settings.defaults()),
            ))
        }
    }
}

/// Builds a registry in settings order. The first entry is the default unless
/// `default` names another registered provider.
pub fn build_registry(
    settings: &[ProviderSettings],
    default: Option<&ProviderId>,
) -> Result<ProviderRegistry, ProviderError> {
    let credentials = settings
        .iter()
        .fold(CredentialStore::new(), |store, entry| match &entry.api_key {
            Some(key) => store.with_api_key(entry.id.clone(), key.clone()),
            None => store,
        });
    let credentials = Arc::new(credentials);

    let mut registry = ProviderRegistry::new();
    for entry in settings {
        registry.register_arc(build_provider(entry, Arc::clone(&credentials))?);
    }

    if let Some(default) = default {
        registry.set_default(default.clone())?;
    }

    Ok(registry)
}

#[cfg(feature = "provider-gemini")]
fn build_gemini_provider(
    settings: &ProviderSettings,
    credentials: Arc<CredentialStore>,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use crate::adapters::gemini::GeminiProvider;

    let transport = Arc::new(GeminiProvider::default_http_transport(http));
    let mut provider = GeminiProvider::new(credentials, transport)
        .with_id(settings.id.clone())
        .with_defaults(settings.defaults());
    if let Some(model) = &settings.model {
        provider = provider.with_model(model.clone());
    }
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-gemini"))]
fn build_gemini_provider(
    _settings: &ProviderSettings,
    _credentials: Arc<CredentialStore>,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-gemini feature is not enabled on sprovider",
    ))
}

#[cfg(feature = "provider-groq")]
fn build_groq_provider(
    settings: &ProviderSettings,
    credentials: Arc<CredentialStore>,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use crate::adapters::groq::GroqProvider;

    let transport = Arc::new(GroqProvider::default_http_transport(http));
    let mut provider = GroqProvider::new(credentials, transport)
        .with_id(settings.id.clone())
        .with_defaults(settings.defaults());
    if let Some(model) = &settings.model {
        provider = provider.with_model(model.clone());
    }
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-groq"))]
fn build_groq_provider(
    _settings: &ProviderSettings,
    _credentials: Arc<CredentialStore>,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-groq feature is not enabled on sprovider",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn kind_names_map_to_variants() {
        assert_eq!(
            ProviderKind::from_name(" Gemini ", None).expect("gemini"),
            ProviderKind::Gemini
        );
        assert_eq!(
            ProviderKind::from_name("openai_compatible", Some("http://localhost:8080/v1"))
                .expect("compat"),
            ProviderKind::OpenAiCompatible {
                base_url: "http://localhost:8080/v1".to_string()
            }
        );

        let err = ProviderKind::from_name("openai_compatible", Some("  "))
            .expect_err("base url required");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
        assert!(ProviderKind::from_name("claude", None).is_err());
    }

    #[cfg(all(feature = "provider-gemini", feature = "provider-groq"))]
    #[test]
    fn registry_keeps_settings_order_and_honors_default() {
        let settings = vec![
            ProviderSettings::gemini().with_api_key("AIza-test"),
            ProviderSettings::groq(),
        ];

        let registry = build_registry(&settings, None).expect("registry builds");
        assert_eq!(
            registry.ids().map(ProviderId::as_str).collect::<Vec<_>>(),
            vec!["gemini", "groq"]
        );
        assert_eq!(registry.default_id(), Some(&ProviderId::new("gemini")));

        let registry =
            build_registry(&settings, Some(&ProviderId::new("groq"))).expect("registry builds");
        assert_eq!(registry.default_id(), Some(&ProviderId::new("groq")));

        let err = build_registry(&settings, Some(&ProviderId::new("claude")))
            .err()
            .expect("unknown default");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
    }

    #[test]
    fn compatible_provider_requires_model() {
        let settings = ProviderSettings::new(
            "local",
            ProviderKind::OpenAiCompatible {
                base_url: "http://localhost:8080/v1".to_string(),
            },
        );

        let err = build_provider(&settings, Arc::new(CredentialStore::new()))
            .err()
            .expect("model required");
        assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
    }
}
