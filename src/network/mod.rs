//! Network Module
//!
//! TCP connection handling.
//!
//! ## Model
//! - One blocking socket per `Connection`, no background threads
//! - Replies come back in the order commands were written
//! - `SharedConnection` serializes callers on different threads

mod connection;
mod shared;

pub use connection::{filter_error, Connection};
pub use shared::SharedConnection;
