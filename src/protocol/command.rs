//! Command definitions
//!
//! A command is the name plus its arguments, each an opaque byte string.

use bytes::Bytes;

use crate::error::{RespError, Result};

/// Conversion into a single command token
///
/// Numbers are sent in their decimal text form, which is what the server
/// parses them from.
pub trait ToArg {
    fn to_arg(&self) -> Bytes;
}

impl ToArg for str {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for [u8] {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl<const N: usize> ToArg for [u8; N] {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl ToArg for Vec<u8> {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl ToArg for Bytes {
    fn to_arg(&self) -> Bytes {
        self.clone()
    }
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> Bytes {
        (**self).to_arg()
    }
}

macro_rules! impl_to_arg_display {
    ($($ty:ty),*) => {
        $(
            impl ToArg for $ty {
                fn to_arg(&self) -> Bytes {
                    Bytes::from(self.to_string())
                }
            }
        )*
    };
}

impl_to_arg_display!(i32, i64, u32, u64, usize, isize, f64);

/// A command ready to be framed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name first, then arguments; never empty
    tokens: Vec<Bytes>,
}

impl Command {
    /// Start a command with its name
    pub fn new(name: impl ToArg) -> Self {
        Self {
            tokens: vec![name.to_arg()],
        }
    }

    /// Build a command from raw tokens, rejecting an empty list
    pub fn from_tokens(tokens: Vec<Bytes>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(RespError::InvalidCommand(
                "a command needs at least a name".to_string(),
            ));
        }
        Ok(Self { tokens })
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl ToArg) -> Self {
        self.tokens.push(arg.to_arg());
        self
    }

    /// Append every argument in order
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.tokens.extend(args.into_iter().map(|a| a.to_arg()));
        self
    }

    /// Append one argument in place
    pub fn push_arg(&mut self, arg: impl ToArg) {
        self.tokens.push(arg.to_arg());
    }

    /// Command name (first token)
    pub fn name(&self) -> &[u8] {
        &self.tokens[0]
    }

    /// Name rendered for logs
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(self.name()).to_ascii_uppercase()
    }

    pub fn tokens(&self) -> &[Bytes] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: a command always has its name
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Shorthand for `Command::new`
pub fn cmd(name: impl ToArg) -> Command {
    Command::new(name)
}
