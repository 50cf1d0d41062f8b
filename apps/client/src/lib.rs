//! Client core for the recruitment platform: session store, authenticated
//! API client with the global 401 policy, query cache with declared
//! invalidation, route guard, and the operation layer views call into.
//!
//! Resume parsing, AI matching, and voice analysis are server-side; this
//! crate consumes them as opaque HTTP endpoints under `/api`.

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod guard;
pub mod models;
pub mod ops;
pub mod session;
pub mod state;
pub mod validation;

pub use crate::api::AuthEvent;
pub use crate::config::Config;
pub use crate::errors::ClientError;
pub use crate::state::{init_tracing, AppContext};
