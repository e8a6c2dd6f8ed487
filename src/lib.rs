//! Money Tracker - multi-account income and expense tracking
//!
//! This library provides the core functionality for the money tracker:
//! accounts with their own currency, income and expense transactions in a
//! fixed category vocabulary, period statistics, and CSV backup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, money, categories)
//! - `storage`: Blob slots, transaction store, clock and change events
//! - `services`: Account registry and transaction repository
//! - `reports`: Totals, breakdowns, period selection and search
//! - `backup`: CSV export and import
//! - `display`: Terminal formatting
//! - `audit`: Audit logging system
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use money_tracker::config::{TrackerPaths, Settings};
//! use money_tracker::services::AccountRegistry;
//! use money_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths, &settings)?;
//! let registry = AccountRegistry::initialize(&storage)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
