//! Sorted set commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{
    expect_bool, expect_float, expect_int, expect_list, expect_opt_float, expect_rank,
};
use crate::protocol::{cmd, ToArg};

impl Connection {
    /// ZADD one member; false when only its score was updated
    pub fn zadd(&mut self, key: impl ToArg, score: f64, member: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("ZADD").arg(key).arg(score).arg(member))?)
    }

    pub fn zrem(&mut self, key: impl ToArg, member: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("ZREM").arg(key).arg(member))?)
    }

    /// ZINCRBY; returns the new score
    pub fn zincrby(&mut self, key: impl ToArg, increment: f64, member: impl ToArg) -> Result<f64> {
        expect_float(self.send(&cmd("ZINCRBY").arg(key).arg(increment).arg(member))?)
    }

    /// ZSCORE; `None` for an unknown member
    pub fn zscore(&mut self, key: impl ToArg, member: impl ToArg) -> Result<Option<f64>> {
        expect_opt_float(self.send(&cmd("ZSCORE").arg(key).arg(member))?)
    }

    pub fn zrank(&mut self, key: impl ToArg, member: impl ToArg) -> Result<Option<i64>> {
        expect_rank(self.send(&cmd("ZRANK").arg(key).arg(member))?)
    }

    pub fn zrevrank(&mut self, key: impl ToArg, member: impl ToArg) -> Result<Option<i64>> {
        expect_rank(self.send(&cmd("ZREVRANK").arg(key).arg(member))?)
    }

    pub fn zrange(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("ZRANGE").arg(key).arg(start).arg(stop))?)
    }

    pub fn zrevrange(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("ZREVRANGE").arg(key).arg(start).arg(stop))?)
    }

    /// Members with `min <= score <= max`
    pub fn zrangebyscore(&mut self, key: impl ToArg, min: f64, max: f64) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("ZRANGEBYSCORE").arg(key).arg(min).arg(max))?)
    }

    pub fn zcard(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("ZCARD").arg(key))?)
    }

    /// Returns how many members were removed
    pub fn zremrangebyscore(&mut self, key: impl ToArg, min: f64, max: f64) -> Result<i64> {
        expect_int(self.send(&cmd("ZREMRANGEBYSCORE").arg(key).arg(min).arg(max))?)
    }
}
