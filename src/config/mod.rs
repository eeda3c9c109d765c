pub mod toml_config;

pub use toml_config::{ContextConfig, ResolverConfig, StoreConfig, StoreKind};

#[cfg(feature = "cli")]
use crate::utils::error::{ResolverError, Result};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "gesture-resolver")]
#[command(about = "Resolve the gesture-to-action configuration for a user, application and OS")]
pub struct CliConfig {
    /// Path to a TOML resolver configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Binding snapshot file (.toml or .json); overrides [store] from the config file
    #[arg(long, conflicts_with = "endpoint")]
    pub snapshot: Option<String>,

    /// HTTP binding store endpoint; overrides [store] from the config file
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long)]
    pub application: Option<String>,

    /// Operating system token (windows, macos, linux); defaults to "any"
    #[arg(long)]
    pub os: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Report gestures with competing bindings instead of the resolved configuration
    #[arg(long)]
    pub explain: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let mut config = match (&self.config, &self.snapshot, &self.endpoint) {
            (Some(path), _, _) => ResolverConfig::from_file(path)?,
            (None, Some(snapshot), _) => ResolverConfig::with_store(StoreConfig::snapshot(snapshot)),
            (None, None, Some(endpoint)) => ResolverConfig::with_store(StoreConfig::http(endpoint)),
            (None, None, None) => {
                return Err(ResolverError::MissingConfigError {
                    field: "--config, --snapshot or --endpoint".to_string(),
                })
            }
        };

        if let Some(snapshot) = &self.snapshot {
            config.store = StoreConfig::snapshot(snapshot);
        } else if let Some(endpoint) = &self.endpoint {
            let previous = std::mem::replace(&mut config.store, StoreConfig::http(endpoint));
            config.store.timeout_seconds = previous.timeout_seconds;
            config.store.headers = previous.headers;
        }

        let mut context = config.context();
        if self.username.is_some() {
            context.username = self.username.clone();
        }
        if self.application.is_some() {
            context.application = self.application.clone();
        }
        if self.os.is_some() {
            context.os = self.os.clone();
        }
        config.context = Some(context);

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_a_store() {
        let cli = CliConfig::parse_from(["gesture-resolver", "--os", "windows"]);
        assert!(matches!(
            cli.resolver_config(),
            Err(ResolverError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_cli_snapshot_and_context() {
        let cli = CliConfig::parse_from([
            "gesture-resolver",
            "--snapshot",
            "bindings.toml",
            "-u",
            "alice",
            "--os",
            "MacOS",
            "--format",
            "table",
        ]);
        let config = cli.resolver_config().unwrap();

        assert_eq!(config.store.r#type, StoreKind::Snapshot);
        assert_eq!(config.context().username.as_deref(), Some("alice"));
        assert_eq!(config.context().os.as_deref(), Some("MacOS"));
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_snapshot_conflicts_with_endpoint() {
        let parsed = CliConfig::try_parse_from([
            "gesture-resolver",
            "--snapshot",
            "a.toml",
            "--endpoint",
            "http://localhost",
        ]);
        assert!(parsed.is_err());
    }
}
