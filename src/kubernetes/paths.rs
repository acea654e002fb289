// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! REST paths of the cluster resources the provisioner manages.
//!
//! Manifests arrive pre-rendered from a `ManifestRenderer` and are sent as
//! raw bodies through `ClusterClient`, so requests address resources by path
//! rather than through typed `kube::Api<K>` handles.

use crate::constants::api::{CORE_V1, RBAC_V1};

pub fn namespaces() -> String {
    format!("{CORE_V1}/namespaces")
}

pub fn namespace(name: &str) -> String {
    format!("{CORE_V1}/namespaces/{name}")
}

pub fn resource_quotas(namespace: &str) -> String {
    format!("{CORE_V1}/namespaces/{namespace}/resourcequotas")
}

pub fn resource_quota(namespace: &str, name: &str) -> String {
    format!("{CORE_V1}/namespaces/{namespace}/resourcequotas/{name}")
}

pub fn service_accounts(namespace: &str) -> String {
    format!("{CORE_V1}/namespaces/{namespace}/serviceaccounts")
}

pub fn service_account(namespace: &str, name: &str) -> String {
    format!("{CORE_V1}/namespaces/{namespace}/serviceaccounts/{name}")
}

pub fn roles(namespace: &str) -> String {
    format!("{RBAC_V1}/namespaces/{namespace}/roles")
}

pub fn role_bindings(namespace: &str) -> String {
    format!("{RBAC_V1}/namespaces/{namespace}/rolebindings")
}
