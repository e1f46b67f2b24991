//! bsab-api: HTTP gateway to the Building Safety Act Bot backend
//!
//! This crate owns the wire contract with the backend: the three REST
//! operations (text query, file query, reference embedding), the typed
//! request/response shapes, and the error taxonomy for failed calls.

pub mod error;
pub mod gateway;
pub mod types;

pub use error::{Error, Result};
pub use gateway::{Gateway, BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
pub use types::*;
