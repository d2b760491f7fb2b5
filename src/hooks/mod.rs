//! Consumer-side data hooks.
//!
//! Everything below the [`resources`](crate::resources) layer is stateless;
//! this module is where read results get cached and writes get coordinated:
//!
//! - [`QueryCache`] deduplicates concurrent fetches per key and serves
//!   stale entries immediately while refreshing in the background.
//! - [`Mutation`] applies an optimistic cache write, rolls it back to a
//!   typed snapshot if the mutation fails, and invalidates dependent
//!   queries when it succeeds.
//! - [`RetryPolicy`] re-runs transient failures with exponential backoff.
//!
//! The hooks never reach into the transport; they wrap futures produced by
//! the resource clients, so every error they see is already an
//! [`ApiError`](crate::ApiError).

mod mutation;
mod query;
mod retry;

pub use mutation::Mutation;
pub use query::{CacheSnapshot, QueryCache};
pub use retry::RetryPolicy;
