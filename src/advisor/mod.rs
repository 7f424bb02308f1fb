//! Advisory commentary from an external text-generation service.
//!
//! The calculators hand over a plain-text context (see [`crate::core::summary`]) and get
//! back prose to show the user. [`Advisor::insights`] never fails: transport problems,
//! a missing API key and empty answers all turn into a user-facing message.
//!
//! # Configuration
//!
//! - `API_KEY`: Generative Language API key. Empty or unset disables the advisor.
//! - `ADVISOR_MODEL`: model name (default: `gemini-3-flash-preview`)
//! - `ADVISOR_BASE_URL`: API root (default: `https://generativelanguage.googleapis.com`)

mod gemini;

pub use gemini::GeminiBackend;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const MISSING_KEY_MESSAGE: &str = "A chave da API (API_KEY) não foi configurada. Por favor, adicione-a às variáveis de ambiente.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Não foi possível gerar insights no momento.";
pub const REQUEST_FAILED_MESSAGE: &str = "Ocorreu um erro ao consultar o especialista de IA. Verifique sua conexão ou a validade da API Key.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advisory service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("advisory service returned no text")]
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Clone)]
pub enum Advisor {
    Gemini(GeminiBackend),
    Disabled,
}

impl Advisor {
    /// A blank key, or an HTTP client that cannot be built, leaves the advisor disabled.
    pub fn from_config(config: AdvisorConfig) -> Self {
        let key = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Self::Disabled,
        };
        match GeminiBackend::new(&config.base_url, &config.model, key, config.temperature) {
            Ok(backend) => Self::Gemini(backend),
            Err(e) => {
                warn!(error = %e, "failed to build advisory HTTP client; advisor disabled");
                Self::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Gemini(_))
    }

    /// Returns advisory prose for `context`, or a message explaining why there is none.
    pub async fn insights(&self, context: &str) -> String {
        let backend = match self {
            Self::Gemini(backend) => backend,
            Self::Disabled => return MISSING_KEY_MESSAGE.to_string(),
        };

        match backend.generate(&build_prompt(context)).await {
            Ok(text) => text,
            Err(AdvisorError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                warn!(error = %e, model = backend.model(), "advisory request failed");
                REQUEST_FAILED_MESSAGE.to_string()
            }
        }
    }
}

pub fn build_prompt(context: &str) -> String {
    format!(
        "Aja como um analista financeiro experiente. Analise os seguintes dados de simulação e \
         forneça 3 dicas práticas e uma breve conclusão sobre a viabilidade ou impacto financeiro. \
         Use português brasileiro.\n\nDados da Simulação:\n{context}"
    )
}
