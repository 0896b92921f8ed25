//! JSFiddle HTTP Client Library
//!
//! This library reads and publishes fiddles on jsfiddle.net.
//!
//! # Features
//!
//! - Fetch the JS, HTML and CSS panes and linked resources of an existing fiddle
//! - Publish a new fiddle through the form-encoded post endpoint
//! - Configurable endpoints for testing against a local server
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API, with callback-style wrappers
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use jsfiddle_http_client::{FetchRequest, FiddleClient, PublishRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FiddleClient::new()?;
//!
//! // Fetch version 3 of a fiddle
//! let fiddle = client.fetch(&FetchRequest::id("zfkgt0vr/3")?)?;
//! println!("JS: {}", fiddle.js);
//! for resource in &fiddle.resources {
//!     println!("Resource: {}", resource);
//! }
//!
//! // Publish a new one
//! let body = client.publish(&PublishRequest {
//!     title: Some("Hello".to_string()),
//!     html: Some("<p>Hello</p>".to_string()),
//!     ..Default::default()
//! })?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

mod client;
mod entities;
mod error;
mod parser;
mod request;

pub use client::{Callback, FiddleClient, FiddleClientBuilder, Framework};
pub use entities::decode_html_entities;
pub use error::FiddleError;
pub use request::{FetchRequest, Fiddle, FiddleId, PublishRequest};
