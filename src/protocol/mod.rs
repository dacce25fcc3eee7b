//! Protocol Module
//!
//! RESP wire format: command framing, reply decoding and reply projection.
//!
//! ## Request Format
//! Every command, whatever its arguments contain, is sent as a counted array
//! of binary-safe strings:
//! ```text
//! *3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n
//! ```
//!
//! ## Reply Types
//! - `+` status line
//! - `-` error line
//! - `:` integer
//! - `$` bulk string (`$-1` = nil)
//! - `*` multi-bulk of bulk strings (`*-1` = nil)

mod command;
mod reply;
mod codec;
pub mod projection;

pub use command::{cmd, Command, ToArg};
pub use reply::Reply;
pub use codec::{
    encode_command, read_line, read_payload, read_reply, read_reply_with, write_command,
    write_token, CRLF, MAX_BULK_LEN,
};
pub use projection::{KvPair, ValueType};
