use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tjchat_config::LogLevel;

/// tjchat — a terminal client for OpenAI-compatible chat completion APIs.
#[derive(Parser, Debug)]
#[command(name = "tjchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Provider section to use (`[api.<name>]`), overriding `[api] provider`.
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Log level override (DEBUG, INFO, WARNING, ERROR; case-insensitive).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive chat (the default).
    Chat(ChatArgs),
    /// Send one raw prompt to the text completions endpoint.
    Complete {
        /// Prompt text.
        prompt: String,

        /// Sampling temperature (0.0-1.0).
        #[arg(short, long, value_parser = parse_temperature)]
        temperature: Option<f64>,

        /// Maximum tokens to generate.
        #[arg(short, long)]
        max_tokens: Option<u32>,
    },
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct ChatArgs {
    /// Sampling temperature for the session (0.0-1.0).
    #[arg(short, long, value_parser = parse_temperature)]
    pub temperature: Option<f64>,

    /// Maximum tokens per reply.
    #[arg(short, long)]
    pub max_tokens: Option<u32>,

    /// System prompt, replacing the configured one.
    #[arg(short, long)]
    pub system: Option<String>,
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(t) if (0.0..=1.0).contains(&t) => Ok(t),
        _ => Err(format!("{s} is not a temperature between 0.0 and 1.0")),
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_chat() {
        let args = Args::try_parse_from(["tjchat"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn chat_overrides() {
        let args = Args::try_parse_from([
            "tjchat",
            "--provider",
            "siliconflow",
            "chat",
            "--temperature",
            "0.2",
            "--system",
            "Be brief.",
        ])
        .unwrap();
        assert_eq!(args.provider.as_deref(), Some("siliconflow"));
        assert_eq!(
            args.command,
            Some(Command::Chat(ChatArgs {
                temperature: Some(0.2),
                max_tokens: None,
                system: Some("Be brief.".into()),
            }))
        );
    }

    #[test]
    fn complete_takes_prompt() {
        let args =
            Args::try_parse_from(["tjchat", "complete", "Once upon a time", "-m", "32"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Complete {
                prompt: "Once upon a time".into(),
                temperature: None,
                max_tokens: Some(32),
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["tjchat", "complete", "hi", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn log_level_accepts_config_vocabulary() {
        let args = Args::try_parse_from(["tjchat", "--log-level", "WARNING"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Warning));

        let args = Args::try_parse_from(["tjchat", "--log-level", "warn"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Warning));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Args::try_parse_from(["tjchat", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn temperature_outside_unit_range_is_rejected() {
        assert!(Args::try_parse_from(["tjchat", "complete", "hi", "-t", "5"]).is_err());
        assert!(Args::try_parse_from(["tjchat", "complete", "hi", "-t", "-0.1"]).is_err());
        assert!(Args::try_parse_from(["tjchat", "chat", "-t", "1.5"]).is_err());
        assert!(Args::try_parse_from(["tjchat", "chat", "-t", "NaN"]).is_err());

        let args = Args::try_parse_from(["tjchat", "complete", "hi", "-t", "0"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Complete { temperature: Some(t), .. }) if t == 0.0
        ));
    }
}
