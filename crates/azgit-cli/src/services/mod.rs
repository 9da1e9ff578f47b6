//! Service layer for business logic with dependency injection.
//!
//! This module contains services that encapsulate business logic and accept
//! trait-based dependencies, enabling testing with mock implementations.

pub mod pull_request;
pub mod tag;

#[cfg(test)]
pub mod test_mocks;

pub use pull_request::{AutoComplete, PullRequestConfig, PullRequestService};
pub use tag::TagService;
