use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum GestureKind {
    Static,
    Dynamic,
    Pose,
}

impl GestureKind {
    /// 大小寫不敏感解析，未知類型回傳 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "static" => Some(GestureKind::Static),
            "dynamic" => Some(GestureKind::Dynamic),
            "pose" => Some(GestureKind::Pose),
            _ => None,
        }
    }
}

impl TryFrom<String> for GestureKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GestureKind::parse(&value).ok_or_else(|| format!("unknown gesture kind '{}'", value))
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureKind::Static => write!(f, "static"),
            GestureKind::Dynamic => write!(f, "dynamic"),
            GestureKind::Pose => write!(f, "pose"),
        }
    }
}

/// Snapshot files and wire rows both go through [`ActionType::parse`], so
/// `"HotKey"` and `"hotkey"` are the same type everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ActionType {
    Hotkey,
    Keypress,
    Mousemove,
    Webhook,
    Custom,
}

impl ActionType {
    /// 大小寫不敏感解析，未知類型回傳 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "hotkey" => Some(ActionType::Hotkey),
            "keypress" => Some(ActionType::Keypress),
            "mousemove" => Some(ActionType::Mousemove),
            "webhook" => Some(ActionType::Webhook),
            "custom" => Some(ActionType::Custom),
            _ => None,
        }
    }
}

impl TryFrom<String> for ActionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ActionType::parse(&value).ok_or_else(|| format!("unknown action type '{}'", value))
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Hotkey => write!(f, "hotkey"),
            ActionType::Keypress => write!(f, "keypress"),
            ActionType::Mousemove => write!(f, "mousemove"),
            ActionType::Webhook => write!(f, "webhook"),
            ActionType::Custom => write!(f, "custom"),
        }
    }
}

/// Operating system an action is declared for.
///
/// Unknown tokens are preserved as `Other` instead of being rejected, so a
/// row with an unexpected OS still has a well-defined precedence tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OsScope {
    Windows,
    Macos,
    Linux,
    Any,
    Other(String),
}

pub const ANY_OS: &str = "any";

impl OsScope {
    pub fn as_str(&self) -> &str {
        match self {
            OsScope::Windows => "windows",
            OsScope::Macos => "macos",
            OsScope::Linux => "linux",
            OsScope::Any => ANY_OS,
            OsScope::Other(token) => token,
        }
    }
}

impl From<&str> for OsScope {
    fn from(value: &str) -> Self {
        let token = value.trim().to_lowercase();
        match token.as_str() {
            "windows" => OsScope::Windows,
            "macos" => OsScope::Macos,
            "linux" => OsScope::Linux,
            "any" => OsScope::Any,
            _ => OsScope::Other(token),
        }
    }
}

impl From<String> for OsScope {
    fn from(value: String) -> Self {
        OsScope::from(value.as_str())
    }
}

impl From<OsScope> for String {
    fn from(value: OsScope) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User or application scope of a binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Scope {
    /// Applies to every user / application.
    #[default]
    Unscoped,
    Specific(String),
}

impl Scope {
    /// An absent request only admits unscoped bindings.
    pub fn matches(&self, requested: Option<&str>) -> bool {
        match (self, requested) {
            (Scope::Unscoped, _) => true,
            (Scope::Specific(id), Some(requested)) => id == requested,
            (Scope::Specific(_), None) => false,
        }
    }

    pub fn specific(id: impl Into<String>) -> Self {
        Scope::Specific(id.into())
    }
}

impl From<Option<String>> for Scope {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) if !id.trim().is_empty() => Scope::Specific(id.trim().to_string()),
            _ => Scope::Unscoped,
        }
    }
}

impl From<Scope> for Option<String> {
    fn from(value: Scope) -> Self {
        match value {
            Scope::Unscoped => None,
            Scope::Specific(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    pub code: String,
    pub name: String,
    pub kind: GestureKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: u64,
    pub action_type: ActionType,
    pub value: String,
    pub os_scope: OsScope,
    pub description: Option<String>,
    pub payload_json: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub id: u64,
    pub gesture_code: String,
    pub action_id: u64,
    #[serde(default)]
    pub user_scope: Scope,
    #[serde(default)]
    pub application_scope: Scope,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// One joined binding/gesture/action row as produced by a binding store.
///
/// Action fields stay optional here: rows can come off the wire and are only
/// trusted after the assembler has checked them. A missing `priority` is a
/// malformed row, not priority 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    pub gesture_code: Option<String>,
    pub gesture_name: Option<String>,
    pub gesture_kind: Option<String>,
    pub action_id: Option<u64>,
    pub action_type: Option<String>,
    pub action_value: Option<String>,
    pub action_os_scope: Option<OsScope>,
    pub action_description: Option<String>,
    pub action_payload: Option<String>,
    pub priority: Option<i32>,
}

impl CandidateRow {
    pub fn from_parts(gesture: &Gesture, action: &Action, priority: i32) -> Self {
        Self {
            gesture_code: Some(gesture.code.clone()),
            gesture_name: Some(gesture.name.clone()),
            gesture_kind: Some(gesture.kind.to_string()),
            action_id: Some(action.id),
            action_type: Some(action.action_type.to_string()),
            action_value: Some(action.value.clone()),
            action_os_scope: Some(action.os_scope.clone()),
            action_description: action.description.clone(),
            action_payload: action.payload_json.clone(),
            priority: Some(priority),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub value: String,
    #[serde(rename = "osType")]
    pub os_scope: OsScope,
    pub description: Option<String>,
    pub payload_json: Option<String>,
}

impl ResolvedAction {
    /// 解析巨集類動作的結構化 payload
    pub fn payload(&self) -> crate::utils::error::Result<Option<serde_json::Value>> {
        self.payload_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(Into::into)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureMapping {
    #[serde(rename = "code")]
    pub gesture_code: String,
    #[serde(rename = "name")]
    pub gesture_name: Option<String>,
    #[serde(rename = "type")]
    pub gesture_kind: Option<GestureKind>,
    pub action: ResolvedAction,
}

/// The resolved configuration returned to agents.
///
/// `os` is always the normalized token that was used for matching, never the
/// raw caller input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub username: Option<String>,
    #[serde(rename = "application")]
    pub application_code: Option<String>,
    #[serde(rename = "osType")]
    pub os: String,
    pub mappings: Vec<GestureMapping>,
}

impl ResolvedConfig {
    pub fn action_for(&self, gesture_code: &str) -> Option<&ResolvedAction> {
        self.mappings
            .iter()
            .find(|mapping| mapping.gesture_code == gesture_code)
            .map(|mapping| &mapping.action)
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
