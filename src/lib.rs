//! Income Tax Engine for South African personal tax returns
//!
//! This crate computes a taxpayer's annual income tax liability from gross
//! income and contributions, using versioned SARS tax-year policies loaded
//! from YAML, and narrates each step of the calculation for reporting.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
