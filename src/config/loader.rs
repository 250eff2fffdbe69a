//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax-year
//! policies from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, TaxConfig, TaxYearPolicy};

/// Loads and provides access to tax-year policies.
///
/// The `ConfigLoader` reads YAML configuration files from a directory once,
/// validates every policy table, and then serves read-only lookups.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/za/
/// ├── jurisdiction.yaml    # Revenue authority metadata
/// └── tax_years/
///     ├── 2024-25.yaml     # One policy per tax year
///     └── 2025-26.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use tax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/za").unwrap();
///
/// let policy = loader.policy("2025/26").unwrap();
/// println!("Primary rebate: R{}", policy.rebates.primary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/za")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any policy table fails validation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/za")?;
    /// # Ok::<(), tax_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let policies = Self::load_policies(&path.join("tax_years"))?;

        let loader = Self::from_policies(metadata, policies)?;
        for policy in loader.config.policies() {
            info!(
                tax_year = %policy.tax_year,
                effective_from = %policy.effective_from,
                brackets = policy.brackets.len(),
                "Loaded tax year policy"
            );
        }

        Ok(loader)
    }

    /// Builds a loader from policies already in memory.
    ///
    /// Applies the same validation as [`ConfigLoader::load`].
    pub fn from_policies(
        metadata: JurisdictionMetadata,
        policies: Vec<TaxYearPolicy>,
    ) -> EngineResult<Self> {
        Ok(Self {
            config: TaxConfig::new(metadata, policies)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all policy files from the tax_years directory.
    fn load_policies(years_dir: &Path) -> EngineResult<Vec<TaxYearPolicy>> {
        let years_dir_str = years_dir.display().to_string();

        let entries = fs::read_dir(years_dir).map_err(|_| EngineError::ConfigNotFound {
            path: years_dir_str.clone(),
        })?;

        let mut policies = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: years_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                policies.push(Self::load_yaml::<TaxYearPolicy>(&path)?);
            }
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax year files found)", years_dir_str),
            });
        }

        Ok(policies)
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Returns the labels of all loaded tax years, oldest first.
    pub fn tax_years(&self) -> Vec<&str> {
        self.config
            .policies()
            .iter()
            .map(|p| p.tax_year.as_str())
            .collect()
    }

    /// Gets a policy by its tax year label.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/za")?;
    /// let policy = loader.policy("2025/26")?;
    /// println!("Top rate: {}", policy.brackets.last().unwrap().rate);
    /// # Ok::<(), tax_engine::error::EngineError>(())
    /// ```
    pub fn policy(&self, tax_year: &str) -> EngineResult<&TaxYearPolicy> {
        self.config
            .policies()
            .iter()
            .find(|p| p.tax_year == tax_year)
            .ok_or_else(|| EngineError::TaxYearNotFound {
                tax_year: tax_year.to_string(),
            })
    }

    /// Gets the policy whose tax year contains `date`.
    pub fn policy_for_date(&self, date: NaiveDate) -> EngineResult<&TaxYearPolicy> {
        self.config
            .policies()
            .iter()
            .rfind(|p| p.covers(date))
            .ok_or(EngineError::NoPolicyForDate { date })
    }

    /// Returns the most recent tax year policy.
    pub fn latest(&self) -> EngineResult<&TaxYearPolicy> {
        self.config
            .policies()
            .last()
            .ok_or_else(|| EngineError::TaxYearNotFound {
                tax_year: "latest".to_string(),
            })
    }
}
