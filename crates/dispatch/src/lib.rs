//! Tool dispatch for the Radim Brain backend.
//!
//! Every tool is a row in a declarative table ([`CATALOG`]): its argument
//! schema and the one HTTP call it makes. The [`Dispatcher`] runs a single
//! generic routine over that table:
//!
//! 1. look the tool up,
//! 2. validate arguments against its schema (nothing is sent on failure),
//! 3. fill in path placeholders, query string or JSON body,
//! 4. send through a [`Transport`](backend::Transport) under a deadline,
//! 5. wrap the response, or the most specific error, into an [`Outcome`].
//!
//! # Example
//!
//! ```no_run
//! use backend::{BackendConfig, HttpTransport};
//! use dispatch::{Dispatcher, Registry};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::from_config(&BackendConfig::from_env())?;
//! let dispatcher = Dispatcher::new(Registry::builtin()?, transport);
//!
//! let outcome = dispatcher
//!     .invoke("radim_get_vitals", Some(json!({"senior_id": "s-001"})))
//!     .await;
//! println!("{}", outcome.render());
//! # Ok(())
//! # }
//! ```

mod catalog;
mod dispatcher;
mod error;
mod outcome;
mod registry;
mod schema;
mod tool;
mod validate;

pub use catalog::CATALOG;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, ErrorKind, RegistryError, Result};
pub use outcome::Outcome;
pub use registry::Registry;
pub use schema::{Param, ParamKind, input_schema};
pub use tool::{CallSpec, ToolDef};
pub use validate::validate;
