use crate::core::context::ResolutionContext;
use crate::core::precedence::{compare_candidates, is_candidate};
use crate::domain::model::{Action, Binding, CandidateRow, Gesture};
use crate::domain::ports::BindingStore;
use crate::utils::error::{ResolverError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Reference tables plus bindings, as exported by the admin tooling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingSnapshot {
    #[serde(default)]
    pub gestures: Vec<Gesture>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl BindingSnapshot {
    /// 依副檔名載入快照：`.json` 使用 JSON，其餘視為 TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ResolverError::ConfigValidationError {
            field: "snapshot".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for BindingSnapshot {
    fn validate(&self) -> Result<()> {
        let mut gesture_codes = HashSet::new();
        for gesture in &self.gestures {
            validate_non_empty_string("gestures.code", &gesture.code)?;
            if !gesture_codes.insert(gesture.code.as_str()) {
                return Err(ResolverError::ValidationError {
                    message: format!("duplicate gesture code '{}'", gesture.code),
                });
            }
        }

        let mut action_ids = HashSet::new();
        for action in &self.actions {
            validate_non_empty_string("actions.value", &action.value)?;
            if !action_ids.insert(action.id) {
                return Err(ResolverError::ValidationError {
                    message: format!("duplicate action id {}", action.id),
                });
            }
        }

        let mut binding_ids = HashSet::new();
        for binding in &self.bindings {
            if !binding_ids.insert(binding.id) {
                return Err(ResolverError::ValidationError {
                    message: format!("duplicate binding id {}", binding.id),
                });
            }
            if !gesture_codes.contains(binding.gesture_code.as_str()) {
                return Err(ResolverError::ValidationError {
                    message: format!(
                        "binding {} references unknown gesture '{}'",
                        binding.id, binding.gesture_code
                    ),
                });
            }
            if !action_ids.contains(&binding.action_id) {
                return Err(ResolverError::ValidationError {
                    message: format!(
                        "binding {} references unknown action {}",
                        binding.id, binding.action_id
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Binding store over an immutable, validated snapshot.
///
/// Rows are filtered with the shared candidate predicate and pre-sorted with
/// the shared comparator, binding order being the stable base.
#[derive(Debug, Clone)]
pub struct InMemoryBindingStore {
    gestures: HashMap<String, Gesture>,
    actions: HashMap<u64, Action>,
    bindings: Vec<Binding>,
}

impl InMemoryBindingStore {
    pub fn new(snapshot: BindingSnapshot) -> Result<Self> {
        snapshot.validate()?;

        Ok(Self {
            gestures: snapshot
                .gestures
                .into_iter()
                .map(|gesture| (gesture.code.clone(), gesture))
                .collect(),
            actions: snapshot
                .actions
                .into_iter()
                .map(|action| (action.id, action))
                .collect(),
            bindings: snapshot.bindings,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("loading binding snapshot from {}", path.display());
        let store = Self::new(BindingSnapshot::from_file(path)?)?;
        tracing::info!(
            "📁 Loaded {} bindings ({} gestures, {} actions) from {}",
            store.bindings.len(),
            store.gestures.len(),
            store.actions.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn candidates(&self, context: &ResolutionContext) -> Vec<CandidateRow> {
        let mut rows: Vec<CandidateRow> = self
            .bindings
            .iter()
            .filter_map(|binding| {
                // 快照已驗證過參照完整性
                let gesture = self.gestures.get(&binding.gesture_code)?;
                let action = self.actions.get(&binding.action_id)?;
                is_candidate(binding, action, context)
                    .then(|| CandidateRow::from_parts(gesture, action, binding.priority))
            })
            .collect();

        rows.sort_by(|a, b| compare_candidates(a, b, context.os()));
        rows
    }
}

#[async_trait]
impl BindingStore for InMemoryBindingStore {
    async fn query_candidates(&self, context: &ResolutionContext) -> Result<Vec<CandidateRow>> {
        Ok(self.candidates(context))
    }
}
