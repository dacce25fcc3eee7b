//! Set commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{expect_bool, expect_bulk, expect_int, expect_list};
use crate::protocol::{cmd, ToArg};

impl Connection {
    /// SADD; false when the member was already there
    pub fn sadd(&mut self, key: impl ToArg, member: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("SADD").arg(key).arg(member))?)
    }

    pub fn srem(&mut self, key: impl ToArg, member: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("SREM").arg(key).arg(member))?)
    }

    pub fn sismember(&mut self, key: impl ToArg, member: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("SISMEMBER").arg(key).arg(member))?)
    }

    pub fn smove(
        &mut self,
        source: impl ToArg,
        destination: impl ToArg,
        member: impl ToArg,
    ) -> Result<bool> {
        expect_bool(self.send(&cmd("SMOVE").arg(source).arg(destination).arg(member))?)
    }

    pub fn scard(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("SCARD").arg(key))?)
    }

    pub fn smembers(&mut self, key: impl ToArg) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("SMEMBERS").arg(key))?)
    }

    pub fn spop(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("SPOP").arg(key))?)
    }

    pub fn srandmember(&mut self, key: impl ToArg) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("SRANDMEMBER").arg(key))?)
    }

    pub fn sinter<K: ToArg>(&mut self, keys: &[K]) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("SINTER").args(keys))?)
    }

    pub fn sunion<K: ToArg>(&mut self, keys: &[K]) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("SUNION").args(keys))?)
    }

    pub fn sdiff<K: ToArg>(&mut self, keys: &[K]) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("SDIFF").args(keys))?)
    }

    /// SINTERSTORE; returns the size of the stored set
    pub fn sinterstore<K: ToArg>(&mut self, destination: impl ToArg, keys: &[K]) -> Result<i64> {
        expect_int(self.send(&cmd("SINTERSTORE").arg(destination).args(keys))?)
    }

    pub fn sunionstore<K: ToArg>(&mut self, destination: impl ToArg, keys: &[K]) -> Result<i64> {
        expect_int(self.send(&cmd("SUNIONSTORE").arg(destination).args(keys))?)
    }

    pub fn sdiffstore<K: ToArg>(&mut self, destination: impl ToArg, keys: &[K]) -> Result<i64> {
        expect_int(self.send(&cmd("SDIFFSTORE").arg(destination).args(keys))?)
    }
}
