//! Core routing policy for serving a single-page application: given a
//! request path, decide between the API surface, a concrete static asset,
//! the SPA index fallback, and the frontend dev server.
//!
//! The crate is HTTP-framework agnostic; `foyer-web` wires it into axum.

pub mod assets;
pub mod config;
pub mod error;
pub mod resolver;
