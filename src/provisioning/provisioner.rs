// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Stands up and tears down tenant namespaces.
//!
//! Provisioning runs a fixed sequence against the cluster API:
//! namespace, resource quota, service account, role, role binding, and
//! finally the account token lookup. Steps run strictly one after another.
//! Nothing is rolled back when a step fails: the error names the step and
//! the namespace so the caller can deprovision it.

use super::names::{account_name, namespace_name, resource_quota_name, role_name};
use crate::config::TokenPollConfig;
use crate::constants::parameters::OWNER;
use crate::error::{ProvisionerError, Result, Step};
use crate::kubernetes::{paths, ClusterClient};
use crate::manifests::{variables, ManifestRenderer, Template, TemplateRenderer, Variables};
use crate::types::{Plan, ServiceInstance};
use http::Method;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

pub struct NamespaceProvisioner<C, R = TemplateRenderer> {
    client: C,
    renderer: R,
    token_poll: TokenPollConfig,
}

impl<C: ClusterClient> NamespaceProvisioner<C> {
    /// Provisioner using the built-in manifest templates
    pub fn with_defaults(client: C, token_poll: TokenPollConfig) -> Self {
        Self::new(client, TemplateRenderer, token_poll)
    }
}

impl<C: ClusterClient, R: ManifestRenderer> NamespaceProvisioner<C, R> {
    pub fn new(client: C, renderer: R, token_poll: TokenPollConfig) -> Self {
        Self {
            client,
            renderer,
            token_poll,
        }
    }

    /// Create the namespace, quota, admin account and RBAC objects for a
    /// service instance, and return the instance with its namespace, account
    /// name and access token filled in.
    #[instrument(skip(self, instance, plan), fields(instance = %instance.service_instance_id))]
    pub async fn provision(
        &self,
        mut instance: ServiceInstance,
        plan: &Plan,
    ) -> Result<ServiceInstance> {
        info!("Provisioning namespace for service instance");

        let owner = instance
            .parameter(OWNER)
            .ok_or_else(|| ProvisionerError::MissingParameter(OWNER.to_string()))?;
        let account = account_name(&instance.organization_id, owner);
        let namespace = namespace_name(&instance.service_instance_id);

        self.create_namespace(&instance.service_instance_id).await?;
        self.create_resource_quota(&namespace, plan)
            .await
            .map_err(failed(Step::CreateResourceQuota, &namespace))?;
        self.create_service_account(&namespace, &account)
            .await
            .map_err(failed(Step::CreateServiceAccount, &namespace))?;
        self.create_role(&namespace, &account)
            .await
            .map_err(failed(Step::CreateRole, &namespace))?;
        self.create_role_binding(&namespace, &account)
            .await
            .map_err(failed(Step::CreateRoleBinding, &namespace))?;
        let token = self
            .fetch_token(&namespace, &account)
            .await
            .map_err(failed(Step::FetchToken, &namespace))?;

        info!("Provisioned namespace {} with account {}", namespace, account);

        instance.namespace_name = Some(namespace);
        instance.account_name = Some(account);
        instance.account_access_token = Some(token);
        Ok(instance)
    }

    /// Create the namespace of a service instance and return its name.
    /// A render failure is reported before anything is sent to the cluster;
    /// every failure is a `Step` error carrying the computed name.
    #[instrument(skip(self))]
    pub async fn create_namespace(&self, service_instance_id: &str) -> Result<String> {
        let namespace = namespace_name(service_instance_id);
        debug!("Creating namespace {}", namespace);

        self.post_namespace(&namespace)
            .await
            .map_err(failed(Step::CreateNamespace, &namespace))?;

        info!("Namespace {} created", namespace);
        Ok(namespace)
    }

    async fn post_namespace(&self, namespace: &str) -> Result<()> {
        let manifest = self
            .renderer
            .render(Template::NamespaceCreate, &variables([("name", namespace)]))?;
        self.client
            .send(Method::POST, &paths::namespaces(), Some(manifest))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, plan))]
    pub async fn create_resource_quota(&self, namespace: &str, plan: &Plan) -> Result<()> {
        info!("Creating resource quota in namespace {}: {:?}", namespace, plan);

        let manifest = self.resource_quota_manifest(namespace, plan)?;
        self.client
            .send(Method::POST, &paths::resource_quotas(namespace), Some(manifest))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_service_account(&self, namespace: &str, account: &str) -> Result<()> {
        info!("Creating service account {}", account);

        let manifest = self.renderer.render(
            Template::AccountCreate,
            &variables([("spaceName", namespace), ("userName", account)]),
        )?;
        self.client
            .send(Method::POST, &paths::service_accounts(namespace), Some(manifest))
            .await?;

        info!("Service account {} created", account);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_role(&self, namespace: &str, account: &str) -> Result<()> {
        info!("Creating role for account {}", account);

        let manifest = self
            .renderer
            .render(Template::RoleCreate, &rbac_variables(namespace, account))?;
        self.client
            .send(Method::POST, &paths::roles(namespace), Some(manifest))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_role_binding(&self, namespace: &str, account: &str) -> Result<()> {
        info!("Creating role binding for account {}", account);

        let manifest = self
            .renderer
            .render(Template::RoleBindingCreate, &rbac_variables(namespace, account))?;
        self.client
            .send(Method::POST, &paths::role_bindings(namespace), Some(manifest))
            .await?;
        Ok(())
    }

    /// Read the name of the account's first secret. The cluster populates it
    /// asynchronously, so an account that is not readable yet (404) or lists
    /// no secrets is polled with capped exponential backoff until the
    /// configured attempts run out.
    #[instrument(skip(self))]
    pub async fn fetch_token(&self, namespace: &str, account: &str) -> Result<String> {
        let path = paths::service_account(namespace, account);
        let attempts = self.token_poll.attempts.max(1);
        let mut delays = self.token_poll.delays();
        let mut not_found = None;

        for attempt in 1..=attempts {
            match self.client.send(Method::GET, &path, None).await {
                Ok(body) => {
                    if let Some(token) = extract_token(&body)? {
                        return Ok(token);
                    }
                    not_found = None;
                }
                Err(e) if e.is_not_found() => not_found = Some(e),
                Err(e) => return Err(e.into()),
            }

            if let Some(delay) = delays.next() {
                debug!(
                    "Service account {} has no secrets yet (attempt {}/{}), waiting {:?}",
                    account, attempt, attempts, delay
                );
                sleep(delay).await;
            }
        }

        match not_found {
            Some(e) => Err(e.into()),
            None => Err(ProvisionerError::TokenExtraction(format!(
                "service account {}/{} has no secrets after {} attempts",
                namespace, account, attempts
            ))),
        }
    }

    /// Delete a namespace. The cluster removes everything inside it.
    #[instrument(skip(self))]
    pub async fn deprovision(&self, namespace: &str) -> Result<()> {
        info!("Deleting namespace {}", namespace);

        self.client
            .send(Method::DELETE, &paths::namespace(namespace), None)
            .await?;

        info!("Namespace {} deleted", namespace);
        Ok(())
    }

    /// `Ok(false)` only when the cluster answers 404; any other failure is
    /// returned as an error.
    #[instrument(skip(self))]
    pub async fn namespace_exists(&self, namespace: &str) -> Result<bool> {
        match self
            .client
            .send(Method::GET, &paths::namespace(namespace), None)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => {
                info!("Namespace {} not found: {}", namespace, e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the namespace quota with the limits of a new plan. Whether the
    /// plan transition is allowed is up to the caller.
    #[instrument(skip(self, plan))]
    pub async fn change_resource_quota(&self, namespace: &str, plan: &Plan) -> Result<()> {
        info!("Changing resource quota in namespace {}: {:?}", namespace, plan);

        let manifest = self.resource_quota_manifest(namespace, plan)?;
        let quota_path = paths::resource_quota(namespace, &resource_quota_name(namespace));
        let response = self
            .client
            .send(Method::PUT, &quota_path, Some(manifest))
            .await?;

        debug!("Change resource quota response body: {}", response);
        Ok(())
    }

    fn resource_quota_manifest(&self, namespace: &str, plan: &Plan) -> Result<String> {
        let plan = plan.normalized();
        let quota_name = resource_quota_name(namespace);

        Ok(self.renderer.render(
            Template::ResourceQuotaCreate,
            &variables([
                ("quotaName", quota_name.as_str()),
                ("memory", plan.memory.as_str()),
                ("disk", plan.disk.as_str()),
            ]),
        )?)
    }
}

fn rbac_variables(namespace: &str, account: &str) -> Variables {
    let role = role_name(namespace);
    variables([
        ("spaceName", namespace),
        ("userName", account),
        ("roleName", role.as_str()),
    ])
}

fn failed(step: Step, namespace: &str) -> impl FnOnce(ProvisionerError) -> ProvisionerError + '_ {
    move |source| ProvisionerError::Step {
        step,
        namespace: namespace.to_string(),
        source: Box::new(source),
    }
}

#[derive(Deserialize)]
struct AccountSecrets {
    #[serde(default)]
    secrets: Option<Vec<SecretReference>>,
}

#[derive(Deserialize)]
struct SecretReference {
    name: Option<String>,
}

/// `Ok(None)` while the account lists no secrets
fn extract_token(body: &str) -> Result<Option<String>> {
    let account: AccountSecrets = serde_json::from_str(body).map_err(|e| {
        ProvisionerError::TokenExtraction(format!("malformed service account document: {}", e))
    })?;

    match account.secrets.as_deref() {
        None | Some([]) => Ok(None),
        Some([first, ..]) => first.name.clone().map(Some).ok_or_else(|| {
            ProvisionerError::TokenExtraction("first service account secret has no name".to_string())
        }),
    }
}
