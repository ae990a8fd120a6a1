//! Error Handling Module
//!
//! This module provides error handling for prompt generation, including:
//! - The library error type (`PromptError`, `ErrorCategory`)
//! - User-facing message helpers
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use modi_prompt::error::{ErrorCategory, PromptError};
//!
//! let error = PromptError::provider(429, "rate limited");
//! assert_eq!(error.category(), ErrorCategory::RateLimit);
//! assert!(error.is_credential_rejection());
//! ```

mod conversions;
pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
