// Copyright 2026, The caas-provisioner Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::token::{POLL_ATTEMPTS, POLL_INTERVAL_MILLIS, POLL_MAX_INTERVAL_MILLIS};
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Provisioner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Overrides the cluster API root of the inferred kube configuration
    pub cluster_url: Option<String>,
    pub token_poll: TokenPollConfig,
}

/// Bounded polling for the service account secret after account creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPollConfig {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for TokenPollConfig {
    fn default() -> Self {
        Self {
            attempts: POLL_ATTEMPTS,
            interval: Duration::from_millis(POLL_INTERVAL_MILLIS),
        }
    }
}

impl TokenPollConfig {
    /// Delays between consecutive attempts, doubling from `interval` and
    /// capped at `POLL_MAX_INTERVAL_MILLIS`
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let max = Duration::from_millis(POLL_MAX_INTERVAL_MILLIS);
        std::iter::successors(Some(self.interval.min(max)), move |d| Some((*d * 2).min(max)))
            .take(self.attempts.max(1) as usize - 1)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let cluster_url = env::var("CLUSTER_API_URL").ok().filter(|u| !u.is_empty());

        let attempts = match env::var("TOKEN_POLL_ATTEMPTS") {
            Ok(v) => v
                .parse::<u32>()
                .context("TOKEN_POLL_ATTEMPTS must be a positive integer")?
                .max(1),
            Err(_) => POLL_ATTEMPTS,
        };
        let interval_ms = match env::var("TOKEN_POLL_INTERVAL_MS") {
            Ok(v) => v
                .parse::<u64>()
                .context("TOKEN_POLL_INTERVAL_MS must be a number of milliseconds")?,
            Err(_) => POLL_INTERVAL_MILLIS,
        };

        Ok(Config {
            cluster_url,
            token_poll: TokenPollConfig {
                attempts,
                interval: Duration::from_millis(interval_ms),
            },
        })
    }
}
