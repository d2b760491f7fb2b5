//! Request execution and the aggregate client.

mod aggregate;
mod executor;

pub use aggregate::{LoyaltyApi, LoyaltyApiBuilder};
pub use executor::{RequestExecutor, RequestExecutorBuilder};
