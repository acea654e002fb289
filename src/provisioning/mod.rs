// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Namespace provisioning workflow.

pub mod names;
pub mod provisioner;

pub use names::{account_name, namespace_name, resource_quota_name, role_name};
pub use provisioner::NamespaceProvisioner;
