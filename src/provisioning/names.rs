// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Deterministic names of the resources owned by a service instance.
//! Later lookups depend on these strings, so they must never change.

use crate::constants::naming::{
    ACCOUNT_STRIPPED_CHARS, ACCOUNT_SUFFIX, NAMESPACE_PREFIX, NAMESPACE_SUFFIX,
    RESOURCE_QUOTA_SUFFIX, ROLE_SUFFIX,
};

/// `paas-<lowercase instance id>-caas`
pub fn namespace_name(service_instance_id: &str) -> String {
    format!(
        "{NAMESPACE_PREFIX}{}{NAMESPACE_SUFFIX}",
        service_instance_id.to_lowercase()
    )
}

pub fn resource_quota_name(namespace: &str) -> String {
    format!("{namespace}{RESOURCE_QUOTA_SUFFIX}")
}

pub fn role_name(namespace: &str) -> String {
    format!("{namespace}{ROLE_SUFFIX}")
}

/// Admin account name derived from the organization and the owner's address:
/// `lowercase(<org>-<stripped local part>)-admin`
pub fn account_name(organization_id: &str, owner: &str) -> String {
    let local_part = owner.split('@').next().unwrap_or_default();
    let stripped: String = local_part
        .chars()
        .filter(|c| !ACCOUNT_STRIPPED_CHARS.contains(c))
        .collect();

    format!(
        "{}{ACCOUNT_SUFFIX}",
        format!("{organization_id}-{stripped}").to_lowercase()
    )
}
