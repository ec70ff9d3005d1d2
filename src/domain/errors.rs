//! Domain Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid page type: {0:?}")]
    InvalidPageType(String),
}
