//! Error types for modfix-edit.
//!
//! This module defines error types that distinguish between:
//! - Shape rejections (exit code 2): the module lacks a required marker and is skipped
//! - Runtime errors (exit code 1): I/O errors and anything else that halts a batch

use modfix_domain::ShapeRejection;
use thiserror::Error;

/// The top-level error type for converting one module.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The module does not look like a convertible module (exit code 2).
    /// Batch runs recover from this and record the file as skipped.
    #[error("shape rejection: {0}")]
    Shape(#[from] ShapeRejection),

    /// A runtime/tool error occurred (exit code 1).
    /// Never recovered from; it stops the batch.
    #[error("runtime error: {0:#}")]
    Runtime(#[from] anyhow::Error),
}

impl ConvertError {
    /// Returns true if this is a shape rejection (exit code 2).
    pub fn is_shape_rejection(&self) -> bool {
        matches!(self, ConvertError::Shape(_))
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Shape(_) => 2,
            ConvertError::Runtime(_) => 1,
        }
    }
}

/// Result type alias using ConvertError.
pub type ConvertResult<T> = Result<T, ConvertError>;
