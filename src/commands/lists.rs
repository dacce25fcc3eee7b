//! List commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{expect_bulk, expect_int, expect_kv_pair, expect_list, expect_ok};
use crate::protocol::{cmd, KvPair, ToArg};

impl Connection {
    /// LPUSH; returns the new list length
    pub fn lpush(&mut self, key: impl ToArg, value: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("LPUSH").arg(key).arg(value))?)
    }

    /// RPUSH; returns the new list length
    pub fn rpush(&mut self, key: impl ToArg, value: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("RPUSH").arg(key).arg(value))?)
    }

    pub fn llen(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("LLEN").arg(key))?)
    }

    /// LRANGE with inclusive, possibly negative, indices
    pub fn lrange(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("LRANGE").arg(key).arg(start).arg(stop))?)
    }

    pub fn ltrim(&mut self, key: impl ToArg, start: i64, stop: i64) -> Result<()> {
        expect_ok(self.send(&cmd("LTRIM").arg(key).arg(start).arg(stop))?)
    }

    pub fn lindex(&mut self, key: impl ToArg, index: i64) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("LINDEX").arg(key).arg(index))?)
    }

    pub fn lset(&mut self, key: impl ToArg, index: i64, value: impl ToArg) -> Result<()> {
        expect_ok(self.send(&cmd("LSET").arg(key).arg(index).arg(value))?)
    }

    /// LREM; returns how many elements were removed
    pub fn lrem(&mut self, key: impl ToArg, count: i64, value: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("LREM").arg(key).arg(count).arg(value))?)
    }

    pub fn lpop(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("LPOP").arg(key))?)
    }

    pub fn rpop(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("RPOP").arg(key))?)
    }

    pub fn rpoplpush(&mut self, source: impl ToArg, destination: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("RPOPLPUSH").arg(source).arg(destination))?)
    }

    /// BLPOP; `None` when the server-side wait of `timeout_secs` expires
    pub fn blpop<K: ToArg>(&mut self, keys: &[K], timeout_secs: u64) -> Result<Option<KvPair>> {
        expect_kv_pair(self.send(&cmd("BLPOP").args(keys).arg(timeout_secs))?)
    }

    /// BRPOP; `None` when the server-side wait of `timeout_secs` expires
    pub fn brpop<K: ToArg>(&mut self, keys: &[K], timeout_secs: u64) -> Result<Option<KvPair>> {
        expect_kv_pair(self.send(&cmd("BRPOP").args(keys).arg(timeout_secs))?)
    }
}
