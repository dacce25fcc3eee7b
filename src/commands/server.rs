//! Connection and server commands

use bytes::Bytes;

use crate::error::Result;
use crate::network::Connection;
use crate::protocol::projection::{
    expect_any_status, expect_int, expect_large_int, expect_ok, expect_status, expect_string,
};
use crate::protocol::{cmd, ToArg};

impl Connection {
    // =========================================================================
    // Connection
    // =========================================================================

    pub fn ping(&mut self) -> Result<()> {
        expect_status(self.send(&cmd("PING"))?, "PONG")
    }

    pub fn echo(&mut self, message: impl ToArg) -> Result<Bytes> {
        expect_string(self.send(&cmd("ECHO").arg(message))?)
    }

    pub fn auth(&mut self, password: impl ToArg) -> Result<()> {
        expect_ok(self.send(&cmd("AUTH").arg(password))?)
    }

    pub fn select(&mut self, database: u32) -> Result<()> {
        expect_ok(self.send(&cmd("SELECT").arg(database))?)
    }

    /// QUIT; the server acknowledges and closes the socket
    pub fn quit(&mut self) -> Result<()> {
        self.send_closing(&cmd("QUIT"))
    }

    // =========================================================================
    // Server
    // =========================================================================

    pub fn dbsize(&mut self) -> Result<i64> {
        expect_int(self.send(&cmd("DBSIZE"))?)
    }

    pub fn flushdb(&mut self) -> Result<()> {
        expect_ok(self.send(&cmd("FLUSHDB"))?)
    }

    pub fn flushall(&mut self) -> Result<()> {
        expect_ok(self.send(&cmd("FLUSHALL"))?)
    }

    pub fn save(&mut self) -> Result<()> {
        expect_ok(self.send(&cmd("SAVE"))?)
    }

    /// BGSAVE; returns the server's status text
    pub fn bgsave(&mut self) -> Result<String> {
        expect_any_status(self.send(&cmd("BGSAVE"))?)
    }

    /// Unix time of the last successful save
    pub fn lastsave(&mut self) -> Result<i128> {
        expect_large_int(self.send(&cmd("LASTSAVE"))?)
    }

    /// INFO as raw text
    pub fn info(&mut self) -> Result<String> {
        let text = expect_string(self.send(&cmd("INFO"))?)?;
        Ok(String::from_utf8_lossy(&text).into_owned())
    }

    /// SHUTDOWN; success means the server closed the connection
    pub fn shutdown(&mut self) -> Result<()> {
        self.send_closing(&cmd("SHUTDOWN"))
    }
}
