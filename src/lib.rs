//! Credit-Dispute Lead Capture API Library
//!
//! Core functionality for the lead-capture service behind the credit-dispute
//! website: declarative form validation, Postgres persistence, and the HTTP
//! handlers for the consultation, credit-report-analysis, and paid
//! credit-investigation forms.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection, pool, and schema bootstrap.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Submission records and API payloads.
//! - `payment_client`: Payment provider client.
//! - `storage`: Submission persistence.
//! - `validation`: Declarative field rules shared by all forms.

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod payment_client;
pub mod storage;
pub mod validation;
