//! Outbound adapters implementing domain ports.
//!
//! - **seed**: in-memory record store holding the seed users and orders
//! - **usuarios**: reqwest client for the remote user directory
//!
//! Adapters translate between domain types and infrastructure details. They
//! contain no business logic.

pub mod seed;
pub mod usuarios;
