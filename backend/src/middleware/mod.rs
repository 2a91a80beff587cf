//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by both services, currently
//! trace identifiers and request logging.

pub mod trace;

pub use trace::Trace;
