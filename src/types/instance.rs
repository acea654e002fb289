// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A broker service instance. The provisioner fills in the namespace,
/// account name and access token; persisting them is the caller's job.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstance {
    pub service_instance_id: String,
    pub organization_id: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_access_token: Option<String>,
}

impl ServiceInstance {
    pub fn new(service_instance_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            service_instance_id: service_instance_id.into(),
            organization_id: organization_id.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(|s| s.as_str())
    }
}
