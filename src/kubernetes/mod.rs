// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and cluster API paths.

pub mod client;
pub mod paths;

pub use client::{create_client, ClusterClient, KubeClusterClient};
