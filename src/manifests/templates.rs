// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in templates backed by typed k8s-openapi objects

use super::{ManifestRenderer, Template, Variables};
use crate::constants::naming::ROLE_BINDING_SUFFIX;
use crate::error::RenderError;
use k8s_openapi::api::core::v1::{Namespace, ResourceQuota, ResourceQuotaSpec, ServiceAccount};
use k8s_openapi::api::rbac::v1::{PolicyRule, Role, RoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::api::ObjectMeta;
use serde::Serialize;
use std::collections::BTreeMap;

/// Renders the provisioner's manifests as YAML
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl ManifestRenderer for TemplateRenderer {
    fn render(&self, template: Template, variables: &Variables) -> Result<String, RenderError> {
        let vars = Vars { template, variables };
        match template {
            Template::NamespaceCreate => to_yaml(&namespace(&vars)?),
            Template::ResourceQuotaCreate => to_yaml(&resource_quota(&vars)?),
            Template::AccountCreate => to_yaml(&service_account(&vars)?),
            Template::RoleCreate => to_yaml(&role(&vars)?),
            Template::RoleBindingCreate => to_yaml(&role_binding(&vars)?),
        }
    }
}

struct Vars<'a> {
    template: Template,
    variables: &'a Variables,
}

impl Vars<'_> {
    fn get(&self, variable: &'static str) -> Result<String, RenderError> {
        let template = self.template.id();
        match self.variables.get(variable) {
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(RenderError::InvalidVariable { template, variable }),
            None => Err(RenderError::MissingVariable { template, variable }),
        }
    }
}

fn to_yaml<T: Serialize>(manifest: &T) -> Result<String, RenderError> {
    Ok(serde_yaml::to_string(manifest)?)
}

fn namespace(vars: &Vars) -> Result<Namespace, RenderError> {
    Ok(Namespace {
        metadata: ObjectMeta {
            name: Some(vars.get("name")?),
            ..Default::default()
        },
        ..Default::default()
    })
}

fn resource_quota(vars: &Vars) -> Result<ResourceQuota, RenderError> {
    let memory = vars.get("memory")?;
    let disk = vars.get("disk")?;

    let hard = BTreeMap::from([
        ("limits.memory".to_string(), Quantity(memory.clone())),
        ("requests.memory".to_string(), Quantity(memory)),
        ("requests.storage".to_string(), Quantity(disk)),
    ]);

    Ok(ResourceQuota {
        metadata: ObjectMeta {
            name: Some(vars.get("quotaName")?),
            ..Default::default()
        },
        spec: Some(ResourceQuotaSpec {
            hard: Some(hard),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn service_account(vars: &Vars) -> Result<ServiceAccount, RenderError> {
    Ok(ServiceAccount {
        metadata: ObjectMeta {
            name: Some(vars.get("userName")?),
            namespace: Some(vars.get("spaceName")?),
            ..Default::default()
        },
        ..Default::default()
    })
}

fn role(vars: &Vars) -> Result<Role, RenderError> {
    // userName is part of the template contract even though the role itself
    // does not name the account
    vars.get("userName")?;

    Ok(Role {
        metadata: ObjectMeta {
            name: Some(vars.get("roleName")?),
            namespace: Some(vars.get("spaceName")?),
            ..Default::default()
        },
        rules: Some(vec![PolicyRule {
            api_groups: Some(vec!["*".to_string()]),
            resources: Some(vec!["*".to_string()]),
            verbs: vec!["*".to_string()],
            ..Default::default()
        }]),
    })
}

fn role_binding(vars: &Vars) -> Result<RoleBinding, RenderError> {
    let role_name = vars.get("roleName")?;
    let space_name = vars.get("spaceName")?;

    Ok(RoleBinding {
        metadata: ObjectMeta {
            name: Some(format!("{role_name}{ROLE_BINDING_SUFFIX}")),
            namespace: Some(space_name.clone()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "Role".to_string(),
            name: role_name,
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: vars.get("userName")?,
            namespace: Some(space_name),
            ..Default::default()
        }]),
    })
}
