// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Manifest rendering: a template id plus variables becomes a YAML document.

pub mod templates;

use crate::error::RenderError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub use templates::TemplateRenderer;

/// Variables handed to a template
pub type Variables = BTreeMap<String, Value>;

/// Manifest templates the provisioner relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    NamespaceCreate,
    ResourceQuotaCreate,
    AccountCreate,
    RoleCreate,
    RoleBindingCreate,
}

impl Template {
    pub fn id(&self) -> &'static str {
        match self {
            Template::NamespaceCreate => "namespace-create",
            Template::ResourceQuotaCreate => "resource-quota-create",
            Template::AccountCreate => "account-create",
            Template::RoleCreate => "role-create",
            Template::RoleBindingCreate => "role-binding-create",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Template {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "namespace-create" => Ok(Template::NamespaceCreate),
            "resource-quota-create" => Ok(Template::ResourceQuotaCreate),
            "account-create" => Ok(Template::AccountCreate),
            "role-create" => Ok(Template::RoleCreate),
            "role-binding-create" => Ok(Template::RoleBindingCreate),
            other => Err(RenderError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Turns a template and its variables into a serialized manifest.
/// Implementations must be free of side effects.
pub trait ManifestRenderer {
    fn render(&self, template: Template, variables: &Variables) -> Result<String, RenderError>;
}

/// Build a variable map from string pairs
pub fn variables<const N: usize>(pairs: [(&str, &str); N]) -> Variables {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
