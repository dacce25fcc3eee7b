//! Protocol codec
//!
//! Encoding of commands and decoding of replies for the RESP wire format.
//!
//! ## Request Format (unified multi-bulk)
//! ```text
//! *<argc>\r\n
//! $<len(arg0)>\r\n<arg0>\r\n
//! ...
//! $<len(argN)>\r\n<argN>\r\n
//! ```
//!
//! ## Reply Format
//! ```text
//! +<status>\r\n
//! -<error>\r\n
//! :<integer>\r\n
//! $<len>\r\n<bytes>\r\n      ($-1\r\n is nil)
//! *<count>\r\n<bulk>...      (*-1\r\n is nil)
//! ```

use std::io::{BufRead, Read, Write};
use std::num::IntErrorKind;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{RespError, Result};
use super::{Command, Reply};

/// Line terminator
pub const CRLF: &[u8; 2] = b"\r\n";

/// Largest bulk payload accepted from a server (512 MB, the server's own cap)
pub const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Largest multi-bulk element count accepted from a server
pub const MAX_MULTI_BULK_LEN: i64 = 1024 * 1024 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command with the unified multi-bulk framing
pub fn encode_command(command: &Command) -> Bytes {
    let tokens = command.tokens();
    let payload: usize = tokens.iter().map(|t| t.len() + 16).sum();

    let mut buf = BytesMut::with_capacity(16 + payload);
    put_header(&mut buf, b'*', tokens.len());
    for token in tokens {
        put_header(&mut buf, b'$', token.len());
        buf.put_slice(token);
        buf.put_slice(CRLF);
    }

    buf.freeze()
}

fn put_header(buf: &mut BytesMut, prefix: u8, len: usize) {
    buf.put_u8(prefix);
    buf.put_slice(len.to_string().as_bytes());
    buf.put_slice(CRLF);
}

/// Write an encoded command to a stream without flushing
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    writer
        .write_all(&encode_command(command))
        .map_err(RespError::from_io)
}

/// Write raw bytes plus CRLF without flushing
pub fn write_token<W: Write>(writer: &mut W, token: &[u8]) -> Result<()> {
    writer.write_all(token).map_err(RespError::from_io)?;
    writer.write_all(CRLF).map_err(RespError::from_io)
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Read exactly one reply from a buffered stream
///
/// Blocks until a complete reply is received or the stream ends.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply> {
    let mut line = Vec::new();
    read_reply_with(reader, &mut line)
}

/// `read_reply` with a caller-owned scratch buffer for header lines
pub fn read_reply_with<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<Reply> {
    let prefix = read_byte(reader)?;

    match prefix {
        b'+' => {
            read_line(reader, line)?;
            Ok(Reply::Status(String::from_utf8_lossy(line).into_owned()))
        }
        b'-' => {
            read_line(reader, line)?;
            Ok(Reply::Error(String::from_utf8_lossy(line).into_owned()))
        }
        b':' => {
            read_line(reader, line)?;
            parse_integer(line)
        }
        b'$' => read_bulk_body(reader, line).map(Reply::Bulk),
        b'*' => read_multi_bulk_body(reader, line).map(Reply::MultiBulk),
        other => Err(RespError::Protocol(format!(
            "unexpected reply type byte 0x{:02x} ({:?})",
            other,
            char::from(other)
        ))),
    }
}

/// Read bytes up to CRLF into `line`, dropping the terminator
pub fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<()> {
    line.clear();
    let n = reader
        .read_until(b'\n', line)
        .map_err(RespError::from_io)?;

    if n == 0 {
        return Err(RespError::ConnectionClosed);
    }

    if !line.ends_with(CRLF) {
        if line.ends_with(b"\n") {
            return Err(RespError::Protocol(
                "line terminated by bare LF".to_string(),
            ));
        }
        // Stream ended mid-line
        return Err(RespError::ConnectionClosed);
    }

    line.truncate(line.len() - CRLF.len());
    Ok(())
}

/// Read exactly `len` payload bytes, then the CRLF that ends them
pub fn read_payload<R: Read>(reader: &mut R, len: usize) -> Result<Bytes> {
    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .map_err(RespError::from_io)?;

    let mut terminator = [0u8; 2];
    reader
        .read_exact(&mut terminator)
        .map_err(RespError::from_io)?;
    if &terminator != CRLF {
        return Err(RespError::Protocol(format!(
            "bulk payload of {} bytes not followed by CRLF (got {:?})",
            len,
            terminator.escape_ascii().to_string()
        )));
    }

    Ok(Bytes::from(payload))
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader
        .read_exact(&mut byte)
        .map_err(RespError::from_io)?;
    Ok(byte[0])
}

/// Body of a `$` reply, after the prefix byte
fn read_bulk_body<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<Option<Bytes>> {
    read_line(reader, line)?;
    let len = parse_length(line, "bulk length")?;

    match len {
        -1 => Ok(None),
        n if n < -1 => Err(RespError::Protocol(format!("negative bulk length {}", n))),
        n if n > MAX_BULK_LEN => Err(RespError::Protocol(format!(
            "bulk length {} exceeds limit of {}",
            n, MAX_BULK_LEN
        ))),
        n => read_payload(reader, n as usize).map(Some),
    }
}

/// Body of a `*` reply, after the prefix byte
fn read_multi_bulk_body<R: BufRead>(
    reader: &mut R,
    line: &mut Vec<u8>,
) -> Result<Option<Vec<Option<Bytes>>>> {
    read_line(reader, line)?;
    let count = parse_length(line, "multi-bulk count")?;

    match count {
        -1 => return Ok(None),
        n if n < -1 => {
            return Err(RespError::Protocol(format!("negative multi-bulk count {}", n)))
        }
        n if n > MAX_MULTI_BULK_LEN => {
            return Err(RespError::Protocol(format!(
                "multi-bulk count {} exceeds limit of {}",
                n, MAX_MULTI_BULK_LEN
            )))
        }
        _ => {}
    }

    // Cap the pre-allocation; the count comes from the wire
    let mut items = Vec::with_capacity((count as usize).min(1024));
    for index in 0..count {
        let prefix = read_byte(reader)?;
        if prefix != b'$' {
            return Err(RespError::Protocol(format!(
                "multi-bulk element {} starts with 0x{:02x} ({:?}), expected '$'",
                index,
                prefix,
                char::from(prefix)
            )));
        }
        items.push(read_bulk_body(reader, line)?);
    }

    Ok(Some(items))
}

fn parse_length(line: &[u8], what: &str) -> Result<i64> {
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            RespError::Protocol(format!(
                "invalid {}: {:?}",
                what,
                String::from_utf8_lossy(line)
            ))
        })
}

/// Parse an integer reply, widening only when i64 overflows
fn parse_integer(line: &[u8]) -> Result<Reply> {
    let invalid = || {
        RespError::Protocol(format!(
            "invalid integer reply: {:?}",
            String::from_utf8_lossy(line)
        ))
    };

    let text = std::str::from_utf8(line).map_err(|_| invalid())?;

    match text.parse::<i64>() {
        Ok(n) => Ok(Reply::Integer(n)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            text.parse::<i128>()
                .map(Reply::LargeInteger)
                .map_err(|_| invalid())
        }
        Err(_) => Err(invalid()),
    }
}
