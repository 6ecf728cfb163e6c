//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for the JobLink offer and
//! notification engine.

pub mod error;
pub mod handler;
mod rate_limiter;
pub mod server;
mod session;
pub mod types;

pub use server::RpcServer;
