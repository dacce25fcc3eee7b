//! Commands Module
//!
//! Typed wrappers over [`Connection::send`](crate::network::Connection::send).
//!
//! Every method builds one command, sends it and applies exactly one
//! projection from [`crate::protocol::projection`]. Keys, values and members
//! accept anything implementing [`ToArg`](crate::protocol::ToArg), so binary
//! keys work the same as text ones.
//!
//! | family      | module      |
//! |-------------|-------------|
//! | connection  | `server`    |
//! | keyspace    | `keys`      |
//! | strings     | `strings`   |
//! | lists       | `lists`     |
//! | sets        | `sets`      |
//! | sorted sets | `zsets`     |
//! | hashes      | `hashes`    |
//! | SORT        | `sort`      |

mod hashes;
mod keys;
mod lists;
mod server;
mod sets;
mod sort;
mod strings;
mod zsets;

pub use sort::{Order, SortOptions};
