//! Candidate selection and ranking.
//!
//! Binding stores filter with [`is_candidate`] and the resolver ranks the
//! returned rows with [`compare_candidates`]. Both live here so the contract
//! can be tested without any storage behind it.

use crate::core::context::ResolutionContext;
use crate::domain::model::{Action, Binding, CandidateRow, OsScope};
use std::cmp::Ordering;

/// How closely an action's OS matches the requested OS. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OsTier {
    Exact,
    Generic,
    Other,
}

pub fn os_tier(os_scope: &OsScope, requested_os: &str) -> OsTier {
    if os_scope.as_str() == requested_os {
        OsTier::Exact
    } else if *os_scope == OsScope::Any {
        OsTier::Generic
    } else {
        OsTier::Other
    }
}

/// A binding is a candidate when it is enabled, its user and application
/// scopes admit the context, and its action targets the requested OS or any OS.
pub fn is_candidate(binding: &Binding, action: &Action, context: &ResolutionContext) -> bool {
    binding.enabled
        && binding.user_scope.matches(context.username())
        && binding.application_scope.matches(context.application_code())
        && os_tier(&action.os_scope, context.os()) != OsTier::Other
}

/// Total order over candidate rows: priority descending, then OS tier, then
/// action id ascending. Rows without a priority or an action id sort after
/// rows with one; the assembler rejects a missing priority afterwards.
pub fn compare_candidates(a: &CandidateRow, b: &CandidateRow, requested_os: &str) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| row_tier(a, requested_os).cmp(&row_tier(b, requested_os)))
        .then_with(|| match (a.action_id, b.action_id) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

fn row_tier(row: &CandidateRow, requested_os: &str) -> OsTier {
    row.action_os_scope
        .as_ref()
        .map(|os_scope| os_tier(os_scope, requested_os))
        .unwrap_or(OsTier::Other)
}

/// Sorts rows into precedence order. The sort is stable, so rows that are
/// equal under [`compare_candidates`] keep the order the store returned.
pub fn rank_candidates(rows: &mut [CandidateRow], context: &ResolutionContext) {
    rows.sort_by(|a, b| compare_candidates(a, b, context.os()));
}
