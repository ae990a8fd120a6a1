//! Execution layer
//!
//! HTTP client construction, header building, and the transport seam that the
//! dispatcher sends prepared requests through.

pub mod http;
