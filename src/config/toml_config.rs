use crate::adapters::{HttpBindingStore, InMemoryBindingStore};
use crate::domain::ports::BindingStore;
use crate::utils::error::{ResolverError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_range, validate_required_field,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub store: StoreConfig,
    pub context: Option<ContextConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Snapshot,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub r#type: StoreKind,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

/// Default request context, overridable from the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    pub username: Option<String>,
    pub application: Option<String>,
    pub os: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl StoreConfig {
    pub fn snapshot(path: impl Into<String>) -> Self {
        Self {
            r#type: StoreKind::Snapshot,
            path: Some(path.into()),
            endpoint: None,
            timeout_seconds: None,
            headers: None,
        }
    }

    pub fn http(endpoint: impl Into<String>) -> Self {
        Self {
            r#type: StoreKind::Http,
            path: None,
            endpoint: Some(endpoint.into()),
            timeout_seconds: None,
            headers: None,
        }
    }
}

impl ResolverConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ResolverError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ResolverError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn with_store(store: StoreConfig) -> Self {
        Self {
            store,
            context: None,
            logging: None,
        }
    }

    /// 替換環境變數 (例如 ${STORE_TOKEN})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ResolverError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.store
            .timeout_seconds
            .unwrap_or(crate::adapters::http::DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn context(&self) -> ContextConfig {
        self.context.clone().unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 依 `[store]` 設定建立綁定存儲
    pub fn build_store(&self) -> Result<Arc<dyn BindingStore>> {
        match self.store.r#type {
            StoreKind::Snapshot => {
                let path = validate_required_field("store.path", &self.store.path)?;
                Ok(Arc::new(InMemoryBindingStore::from_file(path)?))
            }
            StoreKind::Http => {
                let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
                let headers = self.store.headers.clone().unwrap_or_default();
                Ok(Arc::new(HttpBindingStore::with_options(
                    endpoint.clone(),
                    self.timeout_seconds(),
                    &headers,
                )?))
            }
        }
    }
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<()> {
        match self.store.r#type {
            StoreKind::Snapshot => {
                let path = validate_required_field("store.path", &self.store.path)?;
                validate_non_empty_string("store.path", path)?;
                validate_file_extension("store.path", path, &["toml", "json"])?;
            }
            StoreKind::Http => {
                let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
                validate_url("store.endpoint", endpoint)?;
                validate_range("store.timeout_seconds", self.timeout_seconds(), 1, 300)?;
            }
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(ResolverError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}
