use crate::core::context::ResolutionContext;
use crate::domain::model::CandidateRow;
use crate::domain::ports::BindingStore;
use crate::utils::error::{ResolverError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Binding store served over HTTP.
///
/// The remote side applies the candidate predicate and answers with a JSON
/// array of candidate rows. Absent scope parameters are left out of the
/// query string.
#[derive(Debug, Clone)]
pub struct HttpBindingStore {
    client: Client,
    endpoint: String,
}

impl HttpBindingStore {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_options(endpoint, DEFAULT_TIMEOUT_SECONDS, &HashMap::new())
    }

    pub fn with_options(
        endpoint: impl Into<String>,
        timeout_seconds: u64,
        headers: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ResolverError::InvalidConfigValueError {
                    field: "store.headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ResolverError::InvalidConfigValueError {
                    field: format!("store.headers.{}", name),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            default_headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query_params(context: &ResolutionContext) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(username) = context.username() {
            params.push(("username", username.to_string()));
        }
        if let Some(application) = context.application_code() {
            params.push(("application", application.to_string()));
        }
        params.push(("os", context.os().to_string()));
        params
    }
}

#[async_trait]
impl BindingStore for HttpBindingStore {
    async fn query_candidates(&self, context: &ResolutionContext) -> Result<Vec<CandidateRow>> {
        tracing::debug!("Making binding store request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&Self::query_params(context))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Binding store response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResolverError::StoreUnavailable {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<CandidateRow> = serde_json::from_slice(&response.bytes().await?)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_absent_scopes() {
        let params = HttpBindingStore::query_params(&ResolutionContext::new(None, Some("chrome.exe"), None));
        assert_eq!(
            params,
            vec![("application", "chrome.exe".to_string()), ("os", "any".to_string())]
        );
    }

    #[test]
    fn test_invalid_header_is_a_config_error() {
        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        let err = HttpBindingStore::with_options("http://localhost", 5, &headers).unwrap_err();
        assert!(matches!(err, ResolverError::InvalidConfigValueError { .. }));
    }
}
