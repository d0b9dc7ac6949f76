//! Test Module
//!
//! Cross-module test suite for the analysis pipeline.
//!
//! ## Test Categories
//! - `pipeline_tests`: End-to-end runs over small mailboxes, model fallback, export
//! - `property_tests`: Invariants checked over a varied corpus
//! - `config_tests`: Environment settings and lexicon overrides
