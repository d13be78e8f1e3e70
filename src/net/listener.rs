//! TCP listener implementation.
//!
//! # Responsibilities
//! - Bind to the configured host and port
//! - Accept incoming TCP connections
//! - Tag each connection with an id for tracing

use std::net::{IpAddr, SocketAddr};

use tokio::net::{TcpListener, TcpStream};

use crate::config::ListenerConfig;
use crate::net::connection::{ConnectionId, ConnectionIds};

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to address.
    Bind(std::io::Error),
    /// Failed to accept connection.
    Accept(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
            ListenerError::Accept(e) => write!(f, "Failed to accept: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Bind(e) | ListenerError::Accept(e) => Some(e),
        }
    }
}

/// A TCP listener that hands out connection ids with each accepted stream.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    ids: ConnectionIds,
}

impl Listener {
    /// Bind to the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let host: IpAddr = config
            .host
            .parse()
            .map_err(|e| {
                ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
            })?;

        let listener = TcpListener::bind(SocketAddr::new(host, config.port))
            .await
            .map_err(ListenerError::Bind)?;

        Ok(Self::from_tcp(listener))
    }

    /// Wrap an already bound tokio listener.
    pub fn from_tcp(inner: TcpListener) -> Self {
        Self {
            inner,
            ids: ConnectionIds::new(),
        }
    }

    /// Accept a new connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionId), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        let id = self.ids.next_id();

        tracing::debug!(
            connection_id = %id,
            peer_addr = %addr,
            "Connection accepted"
        );

        Ok((stream, addr, id))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}
