//! Cloudcraft API client library for Rust.
//!
//! A thin client for the [Cloudcraft](https://www.cloudcraft.co/) diagramming
//! service's HTTP API: it authenticates requests with a bearer token, builds
//! and dispatches JSON requests, and exposes typed accessors for the
//! blueprint resource.  Every call is a single blocking round trip; there is
//! no caching, retrying, or pagination handling.
//!
//! # Quick Start
//!
//! ```no_run
//! use cloudcraft_client::Client;
//!
//! let client = Client::from_env().unwrap(); // reads CLOUDCRAFT_API_KEY
//!
//! let (blueprints, _) = client.blueprints().list().unwrap();
//! for bp in &blueprints {
//!     println!("{}", bp.name.as_deref().unwrap_or("<unnamed>"));
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

// Re-export the main public types at the crate root for convenience.
pub use client::{ApiResponse, BlueprintsClient, Client};
pub use error::{Error, Result};
pub use models::{Blueprint, BlueprintList, ErrorResponse};
pub use transport::{AuthTransport, HttpTransport, Transport};
