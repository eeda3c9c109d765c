use crate::domain::model::ANY_OS;
use serde::Serialize;

/// Normalized request context a configuration is resolved for.
///
/// Blank user and application inputs become `None` (broadest scope). The OS
/// is lower-cased and falls back to `"any"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolutionContext {
    username: Option<String>,
    application_code: Option<String>,
    os: String,
}

impl ResolutionContext {
    pub fn new(username: Option<&str>, application_code: Option<&str>, os: Option<&str>) -> Self {
        Self {
            username: non_blank(username),
            application_code: non_blank(application_code),
            os: non_blank(os)
                .map(|os| os.to_lowercase())
                .unwrap_or_else(|| ANY_OS.to_string()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn application_code(&self) -> Option<&str> {
        self.application_code.as_deref()
    }

    pub fn os(&self) -> &str {
        &self.os
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_defaults_to_any() {
        assert_eq!(ResolutionContext::new(None, None, None).os(), "any");
        assert_eq!(ResolutionContext::new(None, None, Some("")).os(), "any");
        assert_eq!(ResolutionContext::new(None, None, Some("   ")).os(), "any");
    }

    #[test]
    fn test_os_is_lower_cased() {
        assert_eq!(ResolutionContext::new(None, None, Some("MacOS")).os(), "macos");
        assert_eq!(ResolutionContext::new(None, None, Some(" Windows ")).os(), "windows");
    }

    #[test]
    fn test_blank_scopes_become_absent() {
        let ctx = ResolutionContext::new(Some(""), Some("  "), Some("linux"));
        assert_eq!(ctx.username(), None);
        assert_eq!(ctx.application_code(), None);

        let ctx = ResolutionContext::new(Some("alice"), Some("chrome.exe"), None);
        assert_eq!(ctx.username(), Some("alice"));
        assert_eq!(ctx.application_code(), Some("chrome.exe"));
        assert_eq!(ctx, ResolutionContext::new(Some("alice"), Some("chrome.exe"), Some("any")));
    }
}
