//! On-disk state for boredom-busters.
//!
//! This crate provides utilities for:
//! - Resolving the data directory and config file from the environment.
//! - The per-user preference store with its feedback history.
//! - Loading and seeding the activity catalog.
//!
//! Both documents are plain JSON, read whole and rewritten whole. A missing
//! or undecodable document reads as empty; concurrent writers are not
//! coordinated and the last one wins.

pub mod catalog;
pub mod env;
mod error;
mod persistence;
pub mod store;

pub use catalog::{load_catalog, load_catalog_or_builtin, seed_catalog};
pub use env::{
    busters_home, catalog_path, config_file, data_dir, home_dir, user_store_path, CATALOG_FILE,
    USER_STORE_FILE,
};
pub use error::StoreError;
pub use store::{UserDocument, UserStore};
