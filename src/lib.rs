//! Schema editor core.
//!
//! Holds an application-schema document (entities, actions, data sources,
//! services, environment variables and roles), edits it through a [`State`]
//! session, persists it through a key-value [`store`], and exports it as an
//! application JSON document.

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod model;
pub mod state;
pub mod store;
pub mod utils;

pub use error::{AppError, AppResult};
pub use state::State;
