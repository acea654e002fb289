// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod manifests;
pub mod provisioning;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Config, TokenPollConfig};
pub use error::{ClusterError, ProvisionerError, RenderError, Step};
pub use provisioning::NamespaceProvisioner;
