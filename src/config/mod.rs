//! Configuration loading and management for the Income Tax Engine.
//!
//! This module provides functionality to load tax-year policies from YAML
//! files, including bracket tables, rebates, medical credits and retirement
//! deduction limits. Policies are validated once at load time and are
//! read-only afterwards.
//!
//! # Example
//!
//! ```no_run
//! use tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/za").unwrap();
//! println!("Loaded tax years: {:?}", config.tax_years());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    JurisdictionMetadata, MedicalCredits, Rebates, RetirementDeduction, TaxBracket, TaxConfig,
    TaxYearPolicy,
};

#[cfg(test)]
pub(crate) use types::tests::policy_2025_26;
