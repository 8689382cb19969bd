//! Client for the GPU rent backend.
//!
//! [`ApiClient`] issues the five backend calls; [`notice`] turns their outcome
//! into the lines a user sees, shared by the CLI and the web front end.

pub mod api;
pub mod error;
pub mod notice;

pub use api::ApiClient;
pub use error::ApiError;
pub use notice::{Notice, Tone};
