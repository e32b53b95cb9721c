//! NaturIndo Core - Shared domain types.
//!
//! This crate provides the value types used by the storefront:
//! typed IDs, rupiah prices, emails, slugs, ratings, and order enums.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no session access.
//! Everything here is cheap to construct in tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, slugs, ratings, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
