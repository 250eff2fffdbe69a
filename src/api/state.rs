//! Shared tax-year tables for the API handlers.
//!
//! The router is built once over an [`AppState`]; every request reads the
//! same loaded policies.

use std::sync::Arc;

use crate::config::{ConfigLoader, TaxYearPolicy};

/// The tax-year policies loaded at startup.
///
/// Policies are validated by [`ConfigLoader::load`] before the state is
/// built and never change afterwards, so handlers read them concurrently
/// without locking. Cloning shares the same tables.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Wraps a loaded configuration for sharing across handlers.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the loader, for tax-year lookups by label or date.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns every loaded tax year, oldest first.
    pub fn policies(&self) -> &[TaxYearPolicy] {
        self.config.config().policies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_state() -> AppState {
        AppState::new(ConfigLoader::load("./config/za").unwrap())
    }

    #[test]
    fn test_app_state_is_clone_and_send() {
        fn assert_clone_send_sync<T: Clone + Send + Sync>() {}
        assert_clone_send_sync::<AppState>();
    }

    #[test]
    fn test_clones_share_tax_tables() {
        let state = load_state();
        let clone = state.clone();

        assert!(std::ptr::eq(state.policies(), clone.policies()));
    }

    #[test]
    fn test_policies_are_ordered_by_tax_year() {
        let state = load_state();

        let years: Vec<&str> = state
            .policies()
            .iter()
            .map(|p| p.tax_year.as_str())
            .collect();
        assert_eq!(years, vec!["2022/23", "2024/25", "2025/26"]);
    }
}
