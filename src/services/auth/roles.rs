//! Role extraction and the authorization decision.
//!
//! Keycloak-style tokens nest role claims (e.g. `realm_access/roles`), so the
//! claim location is a configurable delimited path walked through the payload.
//! A claim set lacking the path is indistinguishable from one declaring zero
//! roles: extraction never fails, it just comes back empty.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::services::auth::verifier::ClaimSet;

/// Walk `path` (`/` or `.` delimited) through `claims` and collect role
/// strings at the end of it.
///
/// - Intermediate segments descend object fields only; a missing segment or a
///   non-object intermediate yields the empty set.
/// - Terminal array: string elements are kept, anything else is ignored.
/// - Terminal string: a one-element set.
/// - Any other terminal shape (number, object, bool, null): empty set.
pub fn extract_roles(claims: &ClaimSet, path: &str) -> BTreeSet<String> {
    let mut segments = path.split(['/', '.']).filter(|s| !s.is_empty());

    let Some(first) = segments.next() else {
        return BTreeSet::new();
    };
    let Some(mut current) = claims.get(first) else {
        return BTreeSet::new();
    };

    for segment in segments {
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(next) => current = next,
                None => return BTreeSet::new(),
            },
            _ => return BTreeSet::new(),
        }
    }

    roles_at(current)
}

fn roles_at(value: &Value) -> BTreeSet<String> {
    match value {
        Value::String(role) => BTreeSet::from([role.clone()]),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => BTreeSet::new(),
    }
}

/// Case-sensitive exact membership; role strings are externally supplied, so
/// no normalization happens here.
pub fn is_authorized(roles: &BTreeSet<String>, required: &str) -> bool {
    roles.contains(required)
}
