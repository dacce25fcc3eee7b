//! Hash commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{expect_bool, expect_bulk, expect_int, expect_list};
use crate::protocol::{cmd, ToArg};

impl Connection {
    /// HSET; true when the field is new
    pub fn hset(&mut self, key: impl ToArg, field: impl ToArg, value: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("HSET").arg(key).arg(field).arg(value))?)
    }

    pub fn hget(&mut self, key: impl ToArg, field: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("HGET").arg(key).arg(field))?)
    }

    pub fn hdel(&mut self, key: impl ToArg, field: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("HDEL").arg(key).arg(field))?)
    }

    pub fn hexists(&mut self, key: impl ToArg, field: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("HEXISTS").arg(key).arg(field))?)
    }

    pub fn hlen(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("HLEN").arg(key))?)
    }

    pub fn hkeys(&mut self, key: impl ToArg) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("HKEYS").arg(key))?)
    }

    pub fn hvals(&mut self, key: impl ToArg) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("HVALS").arg(key))?)
    }
}
