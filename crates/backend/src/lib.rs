//! Backend call plumbing for the Radim Brain REST API.
//!
//! This crate holds the shared notion of "one call to the backend": a
//! [`BackendRequest`] describing method, path, query and body, the
//! [`Transport`] trait that executes it, and [`HttpTransport`], the
//! reqwest-backed implementation bound to one base URL and a fixed timeout.
//!
//! Both the tool dispatcher and the typed SDK are built on top of it.
//!
//! # Example
//!
//! ```no_run
//! use backend::{BackendConfig, BackendRequest, HttpTransport, Transport};
//!
//! # async fn example() -> Result<(), backend::TransportError> {
//! let transport = HttpTransport::from_config(&BackendConfig::default())?;
//!
//! let request = BackendRequest::get("/api/seniors").with_query("status", "active");
//! let seniors = transport.send(request).await?;
//! println!("{seniors:#}");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod request;
mod transport;

pub use config::{
    BackendConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ENV_BASE_URL, ENV_BASE_URL_LEGACY,
};
pub use error::{Result, TransportError, extract_detail};
pub use request::{BackendRequest, Method, encode_segment};
pub use transport::{HttpTransport, HttpTransportBuilder, Transport};
