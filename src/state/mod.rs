//! Edit session state module.
//!
//! This module contains the edit session for the document, including:
//! - Main `State` struct that owns the document and the session flags
//! - Navigation types (Category, ActionPath) and action tree resolution
//! - Collection editing over the active list
//! - Form placeholders for new items
//! - State error handling

mod collection;
mod error;
mod form;
mod navigation;

pub use collection::{duplicate, ActiveList, Placement};
pub use error::StateError;
pub use form::{placeholder_item, NewItemKind, NEW_ITEM_NAME};
pub use navigation::{resolve, resolve_mut, ActionPath, Category};

// State struct and its methods are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
