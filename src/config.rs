//! Configuration for atlasresp
//!
//! Connection settings with sensible defaults.

/// Client connection configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Server host name or IP address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Disable Nagle's algorithm on the socket
    pub tcp_nodelay: bool,

    /// Capacity of the buffered reader (bytes)
    pub read_buffer_size: usize,

    /// Capacity of the buffered writer (bytes)
    pub write_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// Start the connection in pipelining mode
    pub pipelining: bool,

    /// Password sent with AUTH right after connecting
    pub password: Option<String>,

    /// Database index sent with SELECT right after connecting
    pub database: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            tcp_nodelay: true,
            read_buffer_size: 8 * 1024,  // 8 KB
            write_buffer_size: 8 * 1024, // 8 KB
            pipelining: false,
            password: None,
            database: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// "host:port" form used for connecting and logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.config.tcp_nodelay = enabled;
        self
    }

    /// Set the read buffer capacity (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the write buffer capacity (in bytes)
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    /// Start in pipelining mode
    pub fn pipelining(mut self, enabled: bool) -> Self {
        self.config.pipelining = enabled;
        self
    }

    /// Authenticate with this password after connecting
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Select this database after connecting
    pub fn database(mut self, index: u32) -> Self {
        self.config.database = Some(index);
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
