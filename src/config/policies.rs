//! Default policy configuration loading from config.toml
//!
//! This module provides functionality to load a default policy set from a
//! TOML configuration file. The policies defined in config.toml are used to
//! seed an organization on first run or when policies are missing.

use crate::{
    entities::{Policy, policy},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{Set, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of policy configurations to seed
    pub policies: Vec<PolicyConfig>,
}

/// Configuration for a single policy
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    /// Name of the policy
    pub name: String,
    /// Hard cap on a single expense amount
    pub max_amount: Option<Decimal>,
    /// Whether expenses under this policy must carry a receipt
    #[serde(default = "default_true")]
    pub requires_receipt: bool,
    /// Whether expenses at or above the approval threshold need manual approval
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    /// Amount at which manual approval becomes mandatory
    pub approval_threshold: Option<Decimal>,
}

const fn default_true() -> bool {
    true
}

/// Loads policy configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads policy configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds an organization with the configured default policies.
///
/// Policies already present (matched by name within the organization) are
/// left untouched, so seeding is idempotent. Returns the number of policies
/// inserted.
pub async fn seed_default_policies(
    db: &DatabaseConnection,
    organization_id: &str,
    config: &Config,
) -> Result<usize> {
    let mut inserted = 0;

    for policy_config in &config.policies {
        let existing = Policy::find()
            .filter(policy::Column::OrganizationId.eq(organization_id))
            .filter(policy::Column::Name.eq(&policy_config.name))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        let policy = policy::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(policy_config.name.clone()),
            organization_id: Set(organization_id.to_string()),
            category_id: Set(None),
            max_amount: Set(policy_config.max_amount),
            requires_receipt: Set(policy_config.requires_receipt),
            requires_approval: Set(policy_config.requires_approval),
            approval_threshold: Set(policy_config.approval_threshold),
            is_active: Set(true),
        };
        policy.insert(db).await?;

        info!(organization_id, name = %policy_config.name, "seeded default policy");
        inserted += 1;
    }

    Ok(inserted)
}
