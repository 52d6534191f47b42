//! Module `state`
//!
//! Defines the `Session` struct capturing one control connection's request
//! once it has been validated.

use std::net::SocketAddr;

use crate::protocol::{Command, Endpoint};

/// The validated state of a single control connection.
///
/// Built once the command has been acknowledged and the client's data
/// endpoint received, and dropped when the connection closes. Nothing
/// persists across sessions.
#[derive(Debug)]
pub struct Session {
    peer_addr: SocketAddr,
    command: Command,
    endpoint: Endpoint,
}

impl Session {
    pub fn new(peer_addr: SocketAddr, command: Command, endpoint: Endpoint) -> Self {
        Self {
            peer_addr,
            command,
            endpoint,
        }
    }

    /// Address of the control connection's remote end.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// The command this session is serving.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// The client's advertised data endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}
