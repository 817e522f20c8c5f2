//! Typed Rust SDK for the Radim Brain elder-care API.
//!
//! Methods are grouped by area, mirroring the backend's route layout:
//!
//! ```no_run
//! use client::{RadimBrain, SeniorFilter};
//!
//! # async fn example() -> client::Result<()> {
//! let radim = RadimBrain::from_env()?;
//!
//! let seniors = radim.seniors().list(&SeniorFilter::default().status("active")).await?;
//! for senior in &seniors {
//!     let id = senior.id.as_deref().unwrap_or_default();
//!     let vitals = radim.seniors().vitals(id).await?;
//!     println!("{id}: {:?}", vitals.heart_rate);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use backend::{BackendConfig, HttpTransport};
pub use client::{
    Ai, Content, DEFAULT_CHAT_USER, DEFAULT_NEWS_CATEGORY, Iot, Memory, Predictions, RadimBrain,
    Scenarios, Seniors, Therapy, Voice,
};
pub use error::{Error, Result};
pub use types::*;
