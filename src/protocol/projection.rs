//! Reply projection
//!
//! Narrow functions that turn a generic [`Reply`] into the exact shape a
//! command promises. Each accepts a fixed set of reply shapes and returns
//! `RespError::ProjectionMismatch` for anything else.
//!
//! Error replies never reach these functions: `Connection::send` turns them
//! into `RespError::Server` first.

use bytes::Bytes;

use crate::error::{RespError, Result};
use super::Reply;

/// Key/value pair returned by blocking pops
pub type KvPair = (Bytes, Bytes);

/// Type of the value stored at a key, as reported by TYPE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    None,
    String,
    List,
    Set,
    ZSet,
    Hash,
}

fn mismatch(expected: &'static str, reply: &Reply) -> RespError {
    RespError::ProjectionMismatch {
        expected,
        found: reply.summary(),
    }
}

// =============================================================================
// Status / Numeric Projections
// =============================================================================

/// Accept only `Status(expected)`
pub fn expect_status(reply: Reply, expected: &'static str) -> Result<()> {
    match reply {
        Reply::Status(ref s) if s == expected => Ok(()),
        other => Err(mismatch(expected, &other)),
    }
}

/// Accept only `Status("OK")`
pub fn expect_ok(reply: Reply) -> Result<()> {
    expect_status(reply, "OK")
}

/// Accept any status line and return its text
pub fn expect_any_status(reply: Reply) -> Result<String> {
    match reply {
        Reply::Status(s) => Ok(s),
        other => Err(mismatch("status", &other)),
    }
}

/// `Integer(0)` is false, `Integer(1)` is true
pub fn expect_bool(reply: Reply) -> Result<bool> {
    match reply {
        Reply::Integer(0) => Ok(false),
        Reply::Integer(1) => Ok(true),
        other => Err(mismatch("integer 0 or 1", &other)),
    }
}

/// Unwrap an `Integer`; `LargeInteger` is rejected
pub fn expect_int(reply: Reply) -> Result<i64> {
    match reply {
        Reply::Integer(n) => Ok(n),
        other => Err(mismatch("integer", &other)),
    }
}

/// Accept `Integer` (widened) or `LargeInteger`
pub fn expect_large_int(reply: Reply) -> Result<i128> {
    match reply {
        Reply::Integer(n) => Ok(i128::from(n)),
        Reply::LargeInteger(n) => Ok(n),
        other => Err(mismatch("integer or large integer", &other)),
    }
}

/// Position of a member, or `None` when it is not there
pub fn expect_rank(reply: Reply) -> Result<Option<i64>> {
    match reply {
        Reply::Integer(n) => Ok(Some(n)),
        Reply::Bulk(None) => Ok(None),
        other => Err(mismatch("integer or nil bulk", &other)),
    }
}

// =============================================================================
// Bulk Projections
// =============================================================================

/// The raw optional payload of a `Bulk`
pub fn expect_bulk(reply: Reply) -> Result<Option<Bytes>> {
    match reply {
        Reply::Bulk(value) => Ok(value),
        other => Err(mismatch("bulk", &other)),
    }
}

/// A `Bulk` that must be present
pub fn expect_string(reply: Reply) -> Result<Bytes> {
    match reply {
        Reply::Bulk(Some(value)) => Ok(value),
        other => Err(mismatch("non-nil bulk", &other)),
    }
}

/// A `Bulk` holding a decimal float
pub fn expect_float(reply: Reply) -> Result<f64> {
    let value = expect_string(reply)?;
    parse_float(&value)
}

/// Like [`expect_float`] but a nil bulk maps to `None`
pub fn expect_opt_float(reply: Reply) -> Result<Option<f64>> {
    match expect_bulk(reply)? {
        Some(value) => parse_float(&value).map(Some),
        None => Ok(None),
    }
}

fn parse_float(value: &[u8]) -> Result<f64> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| parse_float_text(s.trim()))
        .ok_or_else(|| {
            RespError::Format(format!(
                "not a float: {:?}",
                String::from_utf8_lossy(value)
            ))
        })
}

/// Server spells infinities as "inf" and "-inf"
fn parse_float_text(text: &str) -> Option<f64> {
    match text {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => text.parse::<f64>().ok().filter(|v| !v.is_nan()),
    }
}

// =============================================================================
// Multi-Bulk Projections
// =============================================================================

/// A present multi-bulk with no nil elements
pub fn expect_list(reply: Reply) -> Result<Vec<Bytes>> {
    match reply {
        Reply::MultiBulk(Some(items)) => {
            let len = items.len();
            items.into_iter().collect::<Option<Vec<_>>>().ok_or_else(|| {
                RespError::ProjectionMismatch {
                    expected: "multi-bulk without nil elements",
                    found: format!("multi-bulk of {} elements with a nil element", len),
                }
            })
        }
        other => Err(mismatch("non-nil multi-bulk", &other)),
    }
}

/// The multi-bulk exactly as received, nils included
pub fn expect_multi(reply: Reply) -> Result<Option<Vec<Option<Bytes>>>> {
    match reply {
        Reply::MultiBulk(items) => Ok(items),
        other => Err(mismatch("multi-bulk", &other)),
    }
}

/// A two-element multi-bulk as a (key, value) pair; a nil multi-bulk is `None`
pub fn expect_kv_pair(reply: Reply) -> Result<Option<KvPair>> {
    match reply {
        Reply::MultiBulk(None) => Ok(None),
        Reply::MultiBulk(Some(items)) => {
            let found = format!("multi-bulk of {} elements", items.len());
            let mut iter = items.into_iter();
            match (iter.next(), iter.next(), iter.next()) {
                (Some(Some(key)), Some(Some(value)), None) => Ok(Some((key, value))),
                _ => Err(RespError::ProjectionMismatch {
                    expected: "two non-nil bulk elements",
                    found,
                }),
            }
        }
        other => Err(mismatch("multi-bulk pair", &other)),
    }
}

/// TYPE reply as a [`ValueType`]
pub fn expect_type(reply: Reply) -> Result<ValueType> {
    match reply {
        Reply::Status(ref s) => match s.as_str() {
            "none" => Ok(ValueType::None),
            "string" => Ok(ValueType::String),
            "list" => Ok(ValueType::List),
            "set" => Ok(ValueType::Set),
            "zset" => Ok(ValueType::ZSet),
            "hash" => Ok(ValueType::Hash),
            _ => Err(mismatch("type name", &reply)),
        },
        other => Err(mismatch("type name", &other)),
    }
}
