use crate::domain::model::{ActionType, CandidateRow, GestureKind, GestureMapping, ResolvedAction};
use crate::utils::error::{ResolverError, Result};
use std::collections::HashSet;

/// Reduces ranked candidate rows to one mapping per gesture code.
///
/// The first row seen for a gesture wins and later rows for the same code are
/// dropped. Output order is the order in which gesture codes first appear in
/// `ranked`, so callers must rank before assembling.
///
/// Every row is checked, including rows that lose: a malformed row means the
/// snapshot is corrupt and no partial configuration is returned.
pub fn assemble(ranked: &[CandidateRow]) -> Result<Vec<GestureMapping>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut mappings = Vec::new();

    for row in ranked {
        let gesture_code = required(row.gesture_code.as_deref(), "<unknown>", "gestureCode")?;
        let action = resolve_action(gesture_code, row)?;
        resolve_priority(gesture_code, row)?;
        let gesture_kind = resolve_gesture_kind(gesture_code, row)?;

        if !seen.insert(gesture_code) {
            tracing::trace!(gesture = gesture_code, action = %action.value, "candidate shadowed");
            continue;
        }

        mappings.push(GestureMapping {
            gesture_code: gesture_code.to_string(),
            gesture_name: row.gesture_name.clone(),
            gesture_kind,
            action,
        });
    }

    Ok(mappings)
}

pub(crate) fn resolve_action(gesture_code: &str, row: &CandidateRow) -> Result<ResolvedAction> {
    let raw_type = required(row.action_type.as_deref(), gesture_code, "actionType")?;
    let action_type = ActionType::parse(raw_type).ok_or_else(|| {
        ResolverError::malformed(
            gesture_code,
            "actionType",
            format!("has unsupported value '{}'", raw_type),
        )
    })?;
    let value = required(row.action_value.as_deref(), gesture_code, "actionValue")?;
    let os_scope = row
        .action_os_scope
        .clone()
        .filter(|os| !os.as_str().is_empty())
        .ok_or_else(|| ResolverError::malformed(gesture_code, "actionOsScope", "is missing"))?;

    if let Some(payload) = row.action_payload.as_deref() {
        if let Err(e) = serde_json::from_str::<serde_json::Value>(payload) {
            return Err(ResolverError::malformed(
                gesture_code,
                "actionPayload",
                format!("is not valid JSON: {}", e),
            ));
        }
    }

    Ok(ResolvedAction {
        action_type,
        value: value.to_string(),
        os_scope,
        description: row.action_description.clone(),
        payload_json: row.action_payload.clone(),
    })
}

/// Priority is the primary ranking key; a row without one cannot be ranked.
pub(crate) fn resolve_priority(gesture_code: &str, row: &CandidateRow) -> Result<i32> {
    row.priority
        .ok_or_else(|| ResolverError::malformed(gesture_code, "priority", "is missing"))
}

fn resolve_gesture_kind(gesture_code: &str, row: &CandidateRow) -> Result<Option<GestureKind>> {
    row.gesture_kind
        .as_deref()
        .map(|raw| {
            GestureKind::parse(raw).ok_or_else(|| {
                ResolverError::malformed(
                    gesture_code,
                    "gestureKind",
                    format!("has unsupported value '{}'", raw),
                )
            })
        })
        .transpose()
}

fn required<'a>(value: Option<&'a str>, gesture_code: &str, field: &str) -> Result<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ResolverError::malformed(gesture_code, field, "is missing")),
    }
}
