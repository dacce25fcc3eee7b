//! String commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{expect_bool, expect_bulk, expect_int, expect_multi, expect_ok};
use crate::protocol::{cmd, ToArg};

impl Connection {
    /// GET; `None` when the key does not exist
    pub fn get(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("GET").arg(key))?)
    }

    pub fn set(&mut self, key: impl ToArg, value: impl ToArg) -> Result<()> {
        expect_ok(self.send(&cmd("SET").arg(key).arg(value))?)
    }

    /// SETNX; false when the key was already set
    pub fn set_nx(&mut self, key: impl ToArg, value: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("SETNX").arg(key).arg(value))?)
    }

    /// GETSET; returns the previous value
    pub fn get_set(&mut self, key: impl ToArg, value: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("GETSET").arg(key).arg(value))?)
    }

    /// MGET; one entry per key, `None` for missing keys
    pub fn mget<K: ToArg>(&mut self, keys: &[K]) -> Result<Option<Vec<Option<Bytes>>>> {
        expect_multi(self.send(&cmd("MGET").args(keys))?)
    }

    pub fn mset<K: ToArg, V: ToArg>(&mut self, pairs: &[(K, V)]) -> Result<()> {
        let mut command = cmd("MSET");
        for (key, value) in pairs {
            command.push_arg(key);
            command.push_arg(value);
        }
        expect_ok(self.send(&command)?)
    }

    /// MSETNX; false (and nothing written) if any key exists
    pub fn msetnx<K: ToArg, V: ToArg>(&mut self, pairs: &[(K, V)]) -> Result<bool> {
        let mut command = cmd("MSETNX");
        for (key, value) in pairs {
            command.push_arg(key);
            command.push_arg(value);
        }
        expect_bool(self.send(&command)?)
    }

    pub fn incr(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("INCR").arg(key))?)
    }

    pub fn decr(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("DECR").arg(key))?)
    }

    pub fn incr_by(&mut self, key: impl ToArg, delta: i64) -> Result<i64> {
        expect_int(self.send(&cmd("INCRBY").arg(key).arg(delta))?)
    }

    pub fn decr_by(&mut self, key: impl ToArg, delta: i64) -> Result<i64> {
        expect_int(self.send(&cmd("DECRBY").arg(key).arg(delta))?)
    }

    /// APPEND; returns the new length
    pub fn append(&mut self, key: impl ToArg, value: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("APPEND").arg(key).arg(value))?)
    }

    pub fn strlen(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("STRLEN").arg(key))?)
    }

    /// SUBSTR with inclusive offsets
    pub fn substr(&mut self, key: impl ToArg, start: i64, end: i64) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("SUBSTR").arg(key).arg(start).arg(end))?)
    }
}
