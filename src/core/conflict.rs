//! Conflict report for a resolution context.
//!
//! Several enabled bindings may compete for the same gesture. Resolution
//! silently picks one; this report lists every gesture with more than one
//! candidate together with the winner and the shadowed candidates, in rank
//! order, so administrators can see which bindings never fire.

use crate::core::assembler::{resolve_action, resolve_priority};
use crate::domain::model::{CandidateRow, ResolvedAction};
use crate::utils::error::{ResolverError, Result};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub priority: i32,
    pub action_id: Option<u64>,
    pub action: ResolvedAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureConflict {
    pub gesture_code: String,
    pub winner: RankedCandidate,
    /// Always non-empty, in precedence order.
    pub shadowed: Vec<RankedCandidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<GestureConflict>,
    candidates: usize,
}

impl ConflictReport {
    /// Builds the report from rows already in precedence order.
    pub fn from_ranked(ranked: &[CandidateRow]) -> Result<Self> {
        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<RankedCandidate>> = HashMap::new();

        for row in ranked {
            let code = row
                .gesture_code
                .as_deref()
                .filter(|code| !code.trim().is_empty())
                .ok_or_else(|| ResolverError::malformed("<unknown>", "gestureCode", "is missing"))?;
            let candidate = RankedCandidate {
                priority: resolve_priority(code, row)?,
                action_id: row.action_id,
                action: resolve_action(code, row)?,
            };

            grouped
                .entry(code.to_string())
                .or_insert_with(|| {
                    order.push(code.to_string());
                    Vec::new()
                })
                .push(candidate);
        }

        let conflicts = order
            .into_iter()
            .filter_map(|code| {
                let mut candidates = grouped.remove(&code)?;
                if candidates.len() < 2 {
                    return None;
                }
                let winner = candidates.remove(0);
                Some(GestureConflict {
                    gesture_code: code,
                    winner,
                    shadowed: candidates,
                })
            })
            .collect();

        Ok(Self {
            conflicts,
            candidates: ranked.len(),
        })
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Number of candidate rows the report was built from.
    pub fn total_candidates(&self) -> usize {
        self.candidates
    }

    pub fn conflict_for(&self, gesture_code: &str) -> Option<&GestureConflict> {
        self.conflicts
            .iter()
            .find(|conflict| conflict.gesture_code == gesture_code)
    }
}
