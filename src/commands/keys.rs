//! Keyspace commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{
    expect_bool, expect_bulk, expect_int, expect_list, expect_ok, expect_type,
};
use crate::protocol::{cmd, ToArg, ValueType};

impl Connection {
    /// EXISTS on a single key
    pub fn exists(&mut self, key: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("EXISTS").arg(key))?)
    }

    /// DEL; returns how many of `keys` were removed
    pub fn del<K: ToArg>(&mut self, keys: &[K]) -> Result<i64> {
        expect_int(self.send(&cmd("DEL").args(keys))?)
    }

    /// EXPIRE in seconds; false when the key does not exist
    pub fn expire(&mut self, key: impl ToArg, seconds: u64) -> Result<bool> {
        expect_bool(self.send(&cmd("EXPIRE").arg(key).arg(seconds))?)
    }

    /// EXPIREAT with a unix timestamp
    pub fn expire_at(&mut self, key: impl ToArg, timestamp: u64) -> Result<bool> {
        expect_bool(self.send(&cmd("EXPIREAT").arg(key).arg(timestamp))?)
    }

    pub fn persist(&mut self, key: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("PERSIST").arg(key))?)
    }

    /// Remaining time to live; negative values are the server's sentinels
    pub fn ttl(&mut self, key: impl ToArg) -> Result<i64> {
        expect_int(self.send(&cmd("TTL").arg(key))?)
    }

    pub fn rename(&mut self, key: impl ToArg, new_key: impl ToArg) -> Result<()> {
        expect_ok(self.send(&cmd("RENAME").arg(key).arg(new_key))?)
    }

    /// RENAMENX; false when `new_key` already exists
    pub fn rename_nx(&mut self, key: impl ToArg, new_key: impl ToArg) -> Result<bool> {
        expect_bool(self.send(&cmd("RENAMENX").arg(key).arg(new_key))?)
    }

    pub fn keys(&mut self, pattern: impl ToArg) -> Result<Vec<Bytes>> {
        expect_list(self.send(&cmd("KEYS").arg(pattern))?)
    }

    pub fn random_key(&mut self) -> Result<Option<Bytes>> {
        expect_bulk(self.send(&cmd("RANDOMKEY"))?)
    }

    /// TYPE
    pub fn key_type(&mut self, key: impl ToArg) -> Result<ValueType> {
        expect_type(self.send(&cmd("TYPE").arg(key))?)
    }

    /// MOVE to another database index
    pub fn move_key(&mut self, key: impl ToArg, database: u32) -> Result<bool> {
        expect_bool(self.send(&cmd("MOVE").arg(key).arg(database))?)
    }
}
