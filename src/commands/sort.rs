//! SORT and its options

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{expect_int, expect_list};
use crate::protocol::{cmd, Command, ToArg};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/// Options for SORT
///
/// Compiled into trailing tokens in a fixed order:
/// `BY <pattern>`, `LIMIT <offset> <count>`, `GET <pattern>`, `ASC|DESC`, `ALPHA`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortOptions {
    pub by: Option<Bytes>,
    pub limit: Option<(i64, i64)>,
    pub get: Option<Bytes>,
    pub order: Order,
    pub alpha: bool,
}

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by the values of keys built from `pattern`
    pub fn by(mut self, pattern: impl ToArg) -> Self {
        self.by = Some(pattern.to_arg());
        self
    }

    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.limit = Some((offset, count));
        self
    }

    /// Return the values of keys built from `pattern` instead of the elements
    pub fn get(mut self, pattern: impl ToArg) -> Self {
        self.get = Some(pattern.to_arg());
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn desc(self) -> Self {
        self.order(Order::Desc)
    }

    /// Compare lexicographically instead of numerically
    pub fn alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    /// Append the option tokens to `command`
    pub fn apply(&self, mut command: Command) -> Command {
        if let Some(pattern) = &self.by {
            command = command.arg("BY").arg(pattern);
        }
        if let Some((offset, count)) = self.limit {
            command = command.arg("LIMIT").arg(offset).arg(count);
        }
        if let Some(pattern) = &self.get {
            command = command.arg("GET").arg(pattern);
        }
        command = command.arg(match self.order {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        });
        if self.alpha {
            command = command.arg("ALPHA");
        }
        command
    }
}

impl Connection {
    /// SORT the list, set or sorted set at `key`
    pub fn sort(&mut self, key: impl ToArg, options: &SortOptions) -> Result<Vec<Bytes>> {
        let command = options.apply(cmd("SORT").arg(key));
        expect_list(self.send(&command)?)
    }

    /// SORT ... STORE; returns the length of the stored list
    pub fn sort_store(
        &mut self,
        key: impl ToArg,
        options: &SortOptions,
        destination: impl ToArg,
    ) -> Result<i64> {
        let command = options
            .apply(cmd("SORT").arg(key))
            .arg("STORE")
            .arg(destination);
        expect_int(self.send(&command)?)
    }
}
