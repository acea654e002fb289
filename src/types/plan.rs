// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Resource plan a tenant requested, with quota sizes such as `"1GB"`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub memory: String,
    pub disk: String,
}

impl Plan {
    pub fn new(memory: impl Into<String>, disk: impl Into<String>) -> Self {
        Self {
            memory: memory.into(),
            disk: disk.into(),
            ..Default::default()
        }
    }

    /// Copy of this plan with every `B` in the quota sizes rewritten to `i`,
    /// so `"1GB"` becomes the cluster quantity `"1Gi"`.
    pub fn normalized(&self) -> Plan {
        Plan {
            memory: self.memory.replace('B', "i"),
            disk: self.disk.replace('B', "i"),
            ..self.clone()
        }
    }
}
