// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

//! Broker-side records the provisioner reads and enriches.

pub mod instance;
pub mod plan;

pub use instance::ServiceInstance;
pub use plan::Plan;
