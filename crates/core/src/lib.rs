//! MisterDesign Core - Shared types and the persisted collection model.
//!
//! This crate provides the types used across all MisterDesign components:
//! - `storefront` - Local storefront serving the product, cart, and wishlist pages
//! - `cli` - Command-line tools for inspecting and editing persisted collections
//!
//! # Architecture
//!
//! The core crate contains types, traits, and pure collection logic. It does
//! no network or file I/O itself: persistence goes through the
//! [`collection::StoragePort`] trait, whose durable implementation lives in the
//! storefront crate. [`collection::MemoryStorage`] is provided here for tests
//! and ephemeral sessions.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, product records
//! - [`collection`] - Cart and wishlist collections over a storage port

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod types;

pub use collection::{
    AddOutcome, CollectionName, CollectionStore, MemoryStorage, StorageError, StoragePort, Toggle,
};
pub use types::*;
