use anyhow::{Context, Result};

/// Ordered model identifiers the gateway tries, first entry first.
/// Overridable via the MODEL_FALLBACKS environment variable.
pub const DEFAULT_MODEL_FALLBACKS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-1.5-flash",
];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Configuration for the model gateway, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// A missing key is surfaced as a CONFIGURATION_ERROR on first model call,
    /// never as a startup crash.
    pub api_key: Option<String>,
    pub models: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        // GEMINI_API_KEY is the primary variable; GOOGLE_API_KEY is the legacy alias.
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok();

        let models = match std::env::var("MODEL_FALLBACKS") {
            Ok(raw) => parse_model_list(&raw),
            Err(_) => Vec::new(),
        };
        let models = if models.is_empty() {
            DEFAULT_MODEL_FALLBACKS
                .iter()
                .map(|m| m.to_string())
                .collect()
        } else {
            models
        };

        Ok(Config {
            model: ModelConfig { api_key, models },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Splits a comma-separated model list, trimming whitespace and dropping empties.
fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_list_splits_and_trims() {
        let models = parse_model_list("gemini-2.0-flash, gemini-1.5-flash ,gemini-1.5-pro");
        assert_eq!(
            models,
            vec!["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"]
        );
    }

    #[test]
    fn test_parse_model_list_drops_empty_segments() {
        let models = parse_model_list("gemini-2.0-flash,, ,gemini-1.5-flash");
        assert_eq!(models, vec!["gemini-2.0-flash", "gemini-1.5-flash"]);
    }

    #[test]
    fn test_parse_model_list_empty_input() {
        assert!(parse_model_list("").is_empty());
        assert!(parse_model_list(" , ,").is_empty());
    }

    #[test]
    fn test_default_fallbacks_are_ordered_and_nonempty() {
        assert!(!DEFAULT_MODEL_FALLBACKS.is_empty());
        assert_eq!(DEFAULT_MODEL_FALLBACKS[0], "gemini-2.0-flash");
    }
}
