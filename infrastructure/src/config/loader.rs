//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["duaonai.toml", ".duaonai.toml"];

/// Prefix of environment overrides (`DUAONAI_SERVER__PORT=8080`)
const ENV_PREFIX: &str = "DUAONAI_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `DUAONAI_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./duaonai.toml` or `./.duaonai.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/duaonai/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/duaonai/config.toml if set,
    /// otherwise falls back to ~/.config/duaonai/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("duaonai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./duaonai.toml or ./.duaonai.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("duaonai"));
    }

    #[test]
    fn test_project_file_then_explicit_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "duaonai.toml",
                r#"
                [gemini]
                model = "gemini-2.0-flash"
                timeout_seconds = 10

                [server]
                port = 7000
                "#,
            )?;
            jail.create_file(
                "override.toml",
                r#"
                [server]
                port = 7100
                "#,
            )?;
            jail.set_env("DUAONAI_GEMINI__TIMEOUT_SECONDS", "20");

            let config = ConfigLoader::load(Some(Path::new("override.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.gemini.model, "gemini-2.0-flash");
            assert_eq!(config.gemini.timeout_seconds, 20);
            assert_eq!(config.server.port, 7100);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn test_hidden_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                ".duaonai.toml",
                r#"
                [logging]
                conversation_log = "logs/conversation.jsonl"
                "#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(
                config.logging.conversation_log,
                Some(PathBuf::from("logs/conversation.jsonl"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("duaonai.toml", "[server]\nport = \"not a number\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
