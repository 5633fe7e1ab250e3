//! API credentials, read once at startup.

use std::path::PathBuf;

use parley_common::ParleyError;
use parley_config::ProviderKind;
use tracing::debug;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already set in the environment win over the file.
pub fn load_dotenv() {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("parley").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            debug!("loaded environment from {}", path.display());
            return;
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key, value)
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// The API key for one provider.
pub struct Credentials {
    pub provider: ProviderKind,
    pub api_key: String,
}

impl Credentials {
    /// Read the key for `provider` from the environment.
    pub fn from_env(provider: ProviderKind) -> Result<Self, ParleyError> {
        let var = provider.api_key_var();
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self {
                provider,
                api_key: key.trim().to_string(),
            }),
            _ => Err(ParleyError::Credentials(format!(
                "{var} is not set (export it or add it to a .env file)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_lines() {
        let parsed = parse_dotenv(
            "# comment\n\nOPENAI_API_KEY=sk-one\nexport ANTHROPIC_API_KEY = \"sk-two\"\nBROKEN\n",
        );
        assert_eq!(
            parsed,
            vec![("OPENAI_API_KEY", "sk-one"), ("ANTHROPIC_API_KEY", "sk-two")]
        );
    }

    #[test]
    fn strips_single_quotes() {
        assert_eq!(parse_dotenv("K='v'"), vec![("K", "v")]);
    }

    #[test]
    fn skips_empty_keys() {
        assert!(parse_dotenv("=value").is_empty());
    }
}
