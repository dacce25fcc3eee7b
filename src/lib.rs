//! # atlasresp
//!
//! A blocking client for the RESP key-value protocol with:
//! - Binary-safe, length-prefixed command framing
//! - A typed reply model that keeps nil distinct from empty
//! - Narrow projections from replies to the type each command promises
//! - Opt-in pipelining over a single TCP connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Command Layer                            │
//! │          (conn.get / conn.lpush / conn.sort ...)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Connection                              │
//! │        encode → write → flush → read → error filter          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │ Projection  │
//!   │ (*N / $len) │          │ Reply → T   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use atlasresp::Connection;
//!
//! let mut conn = Connection::connect("127.0.0.1", 6379)?;
//! conn.set("greeting", "hello")?;
//! assert_eq!(conn.get("greeting")?.as_deref(), Some(&b"hello"[..]));
//! # Ok::<(), atlasresp::RespError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod commands;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RespError, Result};
pub use config::ClientConfig;
pub use network::{Connection, SharedConnection};
pub use protocol::{cmd, Command, Reply};
pub use commands::{Order, SortOptions};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of atlasresp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
