#[cfg(feature = "provider-openai-compat")]
pub mod openai_compat;

#[cfg(feature = "provider-gemini")]
pub mod gemini;

#[cfg(feature = "provider-groq")]
pub mod groq;
