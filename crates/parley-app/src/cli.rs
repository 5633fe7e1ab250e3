use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use parley_config::{ParleyConfig, ProviderKind};

/// Parley -- an interactive chat client for hosted language models.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `parley=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Provider override.
    #[arg(short = 'p', long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model override.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Answer every line without conversation memory.
    #[arg(long)]
    pub stateless: bool,

    /// Transcript file to restore before the first prompt.
    #[arg(short = 'l', long)]
    pub load: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Anthropic,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Anthropic => ProviderKind::Anthropic,
        }
    }
}

impl Args {
    /// Fold command-line overrides into the loaded config.
    pub fn apply_overrides(&self, config: &mut ParleyConfig) {
        if let Some(provider) = self.provider {
            config.provider.kind = provider.into();
        }
        if let Some(ref model) = self.model {
            config.provider.model = Some(model.clone());
        }
        if self.stateless {
            config.conversation.memory = false;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let args = Args::parse_from([
            "parley",
            "--provider",
            "anthropic",
            "--model",
            "claude-3-haiku-20240307",
            "--stateless",
            "--log-level",
            "parley=debug",
        ]);
        let mut config = ParleyConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.provider.kind, ProviderKind::Anthropic);
        assert_eq!(
            config.provider.model.as_deref(),
            Some("claude-3-haiku-20240307")
        );
        assert!(!config.conversation.memory);
        assert_eq!(config.logging.level, "parley=debug");
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let args = Args::parse_from(["parley"]);
        let mut config = ParleyConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert!(config.conversation.memory);
        assert!(args.load.is_none());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
