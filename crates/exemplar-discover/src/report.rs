// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON listing of collected cases, for tools that consume discovery
//! results without running them.

use exemplar_source::{Address, Namespace};
use serde::Serialize;

use crate::case::Case;
use crate::suite::Group;

#[derive(Debug, Serialize)]
pub struct CollectedCase {
    pub id: String,
    pub label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Why the case could not be addressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectedGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub can_split: bool,
    pub cases: Vec<CollectedCase>,
}

pub fn collect_case(case: &Case, namespace: &Namespace) -> CollectedCase {
    let (address, error) = match case.address(namespace) {
        Ok(address) => (Some(address), None),
        Err(e) => (None, Some(e.to_string())),
    };
    CollectedCase {
        id: case.id(),
        label: case.to_string(),
        description: case.short_description(),
        address,
        error,
    }
}

pub fn collect_groups(groups: &[Group], namespace: &Namespace) -> Vec<CollectedGroup> {
    groups
        .iter()
        .map(|group| CollectedGroup {
            address: group.address(),
            can_split: group.can_split(),
            cases: group.iter().map(|c| collect_case(c, namespace)).collect(),
        })
        .collect()
}

/// Pretty-printed JSON for `groups`.
pub fn to_json(groups: &[Group], namespace: &Namespace) -> String {
    let collected = collect_groups(groups, namespace);
    serde_json::to_string_pretty(&collected)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
