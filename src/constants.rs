// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0

/// Naming conventions for cluster resources owned by a service instance
pub mod naming {
    pub const NAMESPACE_PREFIX: &str = "paas-";
    pub const NAMESPACE_SUFFIX: &str = "-caas";
    pub const RESOURCE_QUOTA_SUFFIX: &str = "-resourcequota";
    pub const ROLE_SUFFIX: &str = "-role";
    pub const ROLE_BINDING_SUFFIX: &str = "-binding";
    pub const ACCOUNT_SUFFIX: &str = "-admin";

    /// Characters stripped from the local part of the owner address
    pub const ACCOUNT_STRIPPED_CHARS: &[char] = &[
        ':', '.', '#', '$', '&', '!', '_', '(', ')', '`', '*', '%', '^', '~', ',', '<', '>', '[',
        ']', ';', '+', '|', '-',
    ];
}

/// Service instance request parameters
pub mod parameters {
    pub const OWNER: &str = "owner";
}

/// Cluster REST API roots
pub mod api {
    pub const CORE_V1: &str = "/api/v1";
    pub const RBAC_V1: &str = "/apis/rbac.authorization.k8s.io/v1";
    pub const MANIFEST_CONTENT_TYPE: &str = "application/yaml";
}

/// Service account token polling configuration
pub mod token {
    pub const POLL_ATTEMPTS: u32 = 5;
    /// Initial polling interval in milliseconds
    pub const POLL_INTERVAL_MILLIS: u64 = 500;
    /// Maximum polling interval in milliseconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_MILLIS: u64 = 5_000;
}
