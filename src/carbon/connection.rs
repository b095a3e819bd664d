use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::{MetricResult, MetricsError};
use parking_lot::{Mutex, MutexGuard};
use tracing::{error, info, warn};

/// Byte sink behind a [`ConnectionHandle`].
pub trait Transport {
    /// Writes the whole buffer, blocking until it is accepted or the write fails.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;
}

impl<T> Transport for &mut T
where
    T: Transport + ?Sized,
{
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        (**self).write_all(buf)
    }
}

impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        (**self).write_all(buf)
    }
}

/// Establishes a [`Transport`] to `(host, port)`.
pub trait Connector {
    /// Transport produced on success.
    type Transport: Transport;

    /// Resolves `host` and connects to it.
    ///
    /// # Errors
    /// [`MetricsError::Resolution`] when the host cannot be resolved,
    /// [`MetricsError::Connection`] when no resolved address accepts the connection.
    fn connect(&self, host: &str, port: u16) -> MetricResult<Self::Transport>;
}

/// TCP stream to a carbon daemon.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpTransport {
    /// Address the stream is connected to.
    #[must_use]
    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for TcpTransport {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        let r = self.stream.write_all(buf);
        if let Err(ref err) = r {
            warn!("TCP send error to {}: {err}", self.peer);
        }
        r
    }
}

/// Connects over TCP, trying every address the host resolves to in order.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
    nodelay: bool,
}

impl TcpConnector {
    /// Creates a connector. `connect_timeout` bounds each address attempt;
    /// `None` uses the operating system default.
    #[must_use]
    pub const fn new(connect_timeout: Option<Duration>, nodelay: bool) -> Self {
        Self {
            connect_timeout,
            nodelay,
        }
    }

    fn connect_addr(&self, addr: &SocketAddr) -> std::io::Result<TcpStream> {
        let stream = match self.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        stream.set_nodelay(self.nodelay)?;
        Ok(stream)
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl Connector for TcpConnector {
    type Transport = TcpTransport;

    fn connect(&self, host: &str, port: u16) -> MetricResult<TcpTransport> {
        let resolution_error = |source| MetricsError::Resolution {
            host: host.to_string(),
            source,
        };
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(resolution_error)?
            .collect();
        if addrs.is_empty() {
            return Err(resolution_error(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no addresses found",
            )));
        }

        let mut last_err = None;
        for addr in &addrs {
            match self.connect_addr(addr) {
                Ok(stream) => {
                    return Ok(TcpTransport {
                        stream,
                        peer: *addr,
                    })
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(MetricsError::Connection {
            endpoint: endpoint(host, port),
            source: last_err.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotConnected, "no address attempted")
            }),
        })
    }
}

/// Health of a [`ConnectionHandle`]. Both states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The single connection attempt succeeded; sends are attempted.
    Connected,
    /// The connection attempt failed; nothing is ever written.
    Failed,
}

enum Link<T> {
    Connected(Mutex<T>),
    Failed(MetricsError),
}

/// One outbound connection to a carbon daemon and its health.
///
/// The handle makes exactly one connection attempt when opened and never
/// reconnects. Writes go through a mutex so concurrent senders cannot interleave
/// a frame header with another frame's payload.
pub struct ConnectionHandle<T = TcpTransport> {
    endpoint: String,
    link: Link<T>,
}

impl ConnectionHandle<TcpTransport> {
    /// Opens a TCP connection to `(host, port)` with the default [`TcpConnector`].
    ///
    /// Never fails: a failed attempt yields a handle in the
    /// [`ConnectionState::Failed`] state. Use [`Self::into_connected`] to turn
    /// that into an error.
    #[must_use]
    pub fn open(host: &str, port: u16) -> Self {
        Self::open_with(&TcpConnector::default(), host, port)
    }
}

impl<T: Transport> ConnectionHandle<T> {
    /// Opens a connection using `connector`, recording success or failure.
    #[must_use]
    pub fn open_with<C>(connector: &C, host: &str, port: u16) -> Self
    where
        C: Connector<Transport = T>,
    {
        info!("Initializing the carbon server {host} on port {port}");
        let endpoint = endpoint(host, port);
        match connector.connect(host, port) {
            Ok(transport) => {
                info!("Successfully connected to carbon server {endpoint}");
                Self::from_transport(endpoint, transport)
            }
            Err(err) => {
                if matches!(err, MetricsError::Resolution { .. }) {
                    error!("{err}. Please check the host name / IP address");
                } else {
                    error!("{err}. Check if the carbon server is running");
                }
                Self::failed(endpoint, err)
            }
        }
    }

    /// Wraps an already connected transport.
    pub fn from_transport(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            link: Link::Connected(Mutex::new(transport)),
        }
    }

    /// Builds a handle whose connection attempt failed with `err`.
    pub fn failed(endpoint: impl Into<String>, err: MetricsError) -> Self {
        Self {
            endpoint: endpoint.into(),
            link: Link::Failed(err),
        }
    }

    /// Current health of the handle.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        match self.link {
            Link::Connected(_) => ConnectionState::Connected,
            Link::Failed(_) => ConnectionState::Failed,
        }
    }

    /// `true` when sends are attempted.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.link, Link::Connected(_))
    }

    /// The error that put the handle in the failed state.
    #[must_use]
    pub const fn failure(&self) -> Option<&MetricsError> {
        match &self.link {
            Link::Connected(_) => None,
            Link::Failed(err) => Some(err),
        }
    }

    /// `host:port` this handle points at.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Converts a failed handle into its connection error.
    ///
    /// # Errors
    /// Returns the resolution or connection error recorded at open time.
    pub fn into_connected(self) -> MetricResult<Self> {
        match self.link {
            Link::Connected(_) => Ok(self),
            Link::Failed(err) => Err(err),
        }
    }

    /// Locks the transport for one exclusive write. `None` when not connected.
    pub(crate) fn lock(&self) -> Option<MutexGuard<'_, T>> {
        match &self.link {
            Link::Connected(transport) => Some(transport.lock()),
            Link::Failed(_) => None,
        }
    }
}

impl<T> std::fmt::Debug for ConnectionHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.link {
            Link::Connected(_) => ConnectionState::Connected,
            Link::Failed(_) => ConnectionState::Failed,
        };
        f.debug_struct("ConnectionHandle")
            .field("endpoint", &self.endpoint)
            .field("state", &state)
            .finish()
    }
}

fn endpoint(host: &str, port: u16) -> String {
    format!("{host}:{port}")
}
