//! REST client for the Pitchcraft backend.
//!
//! The backend owns every business rule; this crate only knows request and
//! response shapes. Requests carry a bearer token when the caller has one and
//! run inside a [`RequestScope`] so a view can drop late responses after it
//! goes away.

mod client;
mod endpoints;
mod error;
mod scope;
pub mod types;

pub use client::{ApiClient, ClientConfig};
pub use error::{ApiError, Result};
pub use scope::RequestScope;
