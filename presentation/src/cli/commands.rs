//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for a generated dua
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted text for the terminal
    #[default]
    Text,
    /// The record as JSON (same shape as the HTTP API)
    Json,
}

/// CLI arguments for duaonai
#[derive(Parser, Debug)]
#[command(name = "duaonai")]
#[command(author, version, about = "Authentic duas with Arabic text, translations and references")]
#[command(long_about = r#"
DuaonAI asks a Gemini model for a dua matching your request and checks the
answer before returning it:
1. All fields are present (Arabic text, English and Urdu translations, reference, title)
2. The Urdu translation is not a copy of the Arabic text
3. The reference names a specific Quran verse or Hadith collection

An answer that fails a check is retried once with a corrective prompt.

Configuration files are loaded from (in priority order):
1. DUAONAI_<SECTION>__<KEY>             Environment variables
2. --config <path>                      Explicit config file
3. ./duaonai.toml                       Project-level config
4. ~/.config/duaonai/config.toml        Global config

Example:
  duaonai ask "dua before sleeping"
  duaonai ask --output json "dua for travel"
  duaonai serve --port 5000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (POST /api/gemini/dua)
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a single dua and print it
    Ask {
        /// What the dua is for, e.g. "dua for travel"
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::parse_from(["duaonai", "ask", "--output", "json", "dua for travel"]);
        assert_eq!(
            cli.command,
            Some(Command::Ask {
                query: "dua for travel".to_string(),
                output: OutputFormat::Json,
            })
        );
    }

    #[test]
    fn test_parse_serve_with_global_flags() {
        let cli = Cli::parse_from(["duaonai", "serve", "--port", "8080", "-vv", "--no-config"]);
        assert_eq!(
            cli.command,
            Some(Command::Serve {
                host: None,
                port: Some(8080),
            })
        );
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::parse_from(["duaonai", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
