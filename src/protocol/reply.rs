//! Reply definitions
//!
//! Typed representation of one server reply.

use std::fmt;

use bytes::Bytes;

/// A single decoded server reply
///
/// Absence is a value of its own: `Bulk(None)` is a nil bulk string and
/// `MultiBulk(None)` a nil array, neither of which equals an empty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `+OK\r\n`
    Status(String),

    /// `:42\r\n` (fits in i64)
    Integer(i64),

    /// `:<digits>\r\n` whose value does not fit in i64
    LargeInteger(i128),

    /// `$3\r\nfoo\r\n` or `$-1\r\n`
    Bulk(Option<Bytes>),

    /// `*2\r\n$1\r\na\r\n$-1\r\n` or `*-1\r\n`
    MultiBulk(Option<Vec<Option<Bytes>>>),

    /// `-ERR something\r\n`
    Error(String),
}

impl Reply {
    /// Short name of the reply kind
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Status(_) => "status",
            Reply::Integer(_) => "integer",
            Reply::LargeInteger(_) => "large integer",
            Reply::Bulk(_) => "bulk",
            Reply::MultiBulk(_) => "multi-bulk",
            Reply::Error(_) => "error",
        }
    }

    /// Compact description used in mismatch errors (never dumps payloads)
    pub fn summary(&self) -> String {
        match self {
            Reply::Status(s) => format!("status {:?}", s),
            Reply::Integer(n) => format!("integer {}", n),
            Reply::LargeInteger(n) => format!("large integer {}", n),
            Reply::Bulk(None) => "nil bulk".to_string(),
            Reply::Bulk(Some(b)) => format!("bulk of {} bytes", b.len()),
            Reply::MultiBulk(None) => "nil multi-bulk".to_string(),
            Reply::MultiBulk(Some(items)) => format!("multi-bulk of {} elements", items.len()),
            Reply::Error(e) => format!("error {:?}", e),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

/// redis-cli style rendering, used by the CLI
impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Status(s) => write!(f, "{}", s),
            Reply::Error(e) => write!(f, "(error) {}", e),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::LargeInteger(n) => write!(f, "(integer) {}", n),
            Reply::Bulk(None) | Reply::MultiBulk(None) => write!(f, "(nil)"),
            Reply::Bulk(Some(b)) => write_quoted(f, b),
            Reply::MultiBulk(Some(items)) if items.is_empty() => {
                write!(f, "(empty list or set)")
            }
            Reply::MultiBulk(Some(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) ", i + 1)?;
                    match item {
                        Some(b) => write_quoted(f, b)?,
                        None => write!(f, "(nil)")?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "\"{}\"", bytes.escape_ascii())
}
