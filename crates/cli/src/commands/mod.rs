//! CLI subcommand implementations.

pub mod catalog;
pub mod dashboard;
pub mod inquiries;
pub mod orders;
pub mod products;

use thiserror::Error;

/// Failures specific to CLI argument handling.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("refusing to delete without --yes")]
    NotConfirmed,
}
