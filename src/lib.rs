//! Type-safe client for the loyalty platform REST API.
//!
//! One resource client per backend resource, all funneling through a single
//! request executor with a composable middleware chain and schema-validated
//! responses.
//!
//! ## Features
//!
//! - **Typed operations**: Every endpoint is a method with typed params,
//!   body and response; invalid input fails before any network I/O
//! - **Async-first HTTP client**: Built on `reqwest` with `tokio`, one
//!   shared connection pool
//! - **Middleware chain**: Immutable stacks of request/response stages,
//!   composed defaults-first
//! - **Layered error handling**: Structured errors for configuration,
//!   validation, status, transport, timeout and cancellation failures
//! - **Data hooks**: Query cache with fetch deduplication and
//!   stale-while-revalidate, optimistic mutations with rollback, bounded
//!   retry
//!
//! ## Example
//!
//! ```rust,ignore
//! use loyalty_api::LoyaltyApi;
//! use url::Url;
//!
//! let api = LoyaltyApi::builder(Url::parse("https://api.example.com")?)
//!     .bearer_token(token)
//!     .build()?;
//!
//! let account = api.accounts.read("42").await?.data;
//! println!("{}: {} points", account.owner_name, account.points);
//! ```

pub mod client;
pub mod error;
pub mod hooks;
pub mod method;
pub mod middleware;
pub mod models;
pub mod request;
pub mod resources;
pub mod response;
pub mod schema;

// Re-exports for convenience
pub use client::{LoyaltyApi, LoyaltyApiBuilder, RequestExecutor, RequestExecutorBuilder};
pub use error::{ApiError, ConfigError, StatusError, ValidationError};
pub use hooks::{Mutation, QueryCache, RetryPolicy};
pub use method::RestMethod;
pub use middleware::{Middleware, MiddlewareStack};
pub use request::{QueryValue, RequestConfig};
pub use response::{ClientResponse, RawResponse};
