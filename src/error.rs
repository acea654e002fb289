// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use thiserror::Error;

/// Failure to turn a template and its variables into a manifest
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Template {template} is missing variable '{variable}'")]
    MissingVariable {
        template: &'static str,
        variable: &'static str,
    },

    #[error("Template {template} expects variable '{variable}' to be a string")]
    InvalidVariable {
        template: &'static str,
        variable: &'static str,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Failure of a single call against the cluster API
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Cluster API returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Cluster API request failed: {0}")]
    Transport(kube::Error),
}

impl ClusterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterError::Status { code: 404, .. })
    }
}

impl From<kube::Error> for ClusterError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => ClusterError::Status {
                code: resp.code,
                message: resp.message,
            },
            other => ClusterError::Transport(other),
        }
    }
}

/// Ordered steps of namespace provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateNamespace,
    CreateResourceQuota,
    CreateServiceAccount,
    CreateRole,
    CreateRoleBinding,
    FetchToken,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CreateNamespace => "create namespace",
            Step::CreateResourceQuota => "create resource quota",
            Step::CreateServiceAccount => "create service account",
            Step::CreateRole => "create role",
            Step::CreateRoleBinding => "create role binding",
            Step::FetchToken => "fetch token",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("Manifest rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("Token extraction failed: {0}")]
    TokenExtraction(String),

    #[error("Missing service instance parameter: {0}")]
    MissingParameter(String),

    #[error("Provisioning step '{step}' failed in namespace {namespace}: {source}")]
    Step {
        step: Step,
        namespace: String,
        #[source]
        source: Box<ProvisionerError>,
    },
}

impl ProvisionerError {
    /// Namespace that was being provisioned when a step failed
    pub fn namespace(&self) -> Option<&str> {
        match self {
            ProvisionerError::Step { namespace, .. } => Some(namespace),
            _ => None,
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            ProvisionerError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;
