//! Shared Connection
//!
//! A `Connection` behind a mutex for callers on several threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::protocol::{Command, Reply};
use super::Connection;

/// Cloneable handle to one connection
///
/// The lock is held for a whole write-then-read step (or a whole pipeline),
/// so replies can never be handed to the wrong caller.
#[derive(Clone)]
pub struct SharedConnection {
    inner: Arc<Mutex<Connection>>,
}

impl SharedConnection {
    pub fn new(connection: Connection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    /// `Connection::send` under the lock
    pub fn send(&self, command: &Command) -> Result<Reply> {
        self.inner.lock().send(command)
    }

    /// `Connection::pipeline` under the lock
    pub fn pipeline(&self, commands: &[Command]) -> Result<Vec<Reply>> {
        self.inner.lock().pipeline(commands)
    }

    /// Run several operations as one exclusive step
    ///
    /// ```no_run
    /// # use atlasresp::network::{Connection, SharedConnection};
    /// # let shared = SharedConnection::new(Connection::connect("127.0.0.1", 6379)?);
    /// let hits = shared.with(|conn| conn.incr("hits"))?;
    /// # Ok::<(), atlasresp::RespError>(())
    /// ```
    pub fn with<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut Connection) -> T,
    {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn peer_addr(&self) -> String {
        self.inner.lock().peer_addr().to_string()
    }
}
