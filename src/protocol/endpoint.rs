//! Module `endpoint`
//!
//! Decodes the client's advertised data endpoint from the second
//! control-connection message.

use crate::error::ProtocolError;

/// A client's listening data endpoint, as advertised on the control
/// connection.
///
/// Host and port are kept as raw strings; the data channel hands them to
/// address resolution unchanged, so both numeric and name-based forms work.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub host: String,
    pub port: String,
}

impl Endpoint {
    /// Parses a `host|port` address buffer, splitting at the first `|`.
    ///
    /// A buffer with no `|` is a protocol error; the session must abort
    /// rather than dial anything.
    pub fn parse(raw: &[u8]) -> Result<Self, ProtocolError> {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let address = &raw[..end];

        let sep = address.iter().position(|&b| b == b'|').ok_or_else(|| {
            ProtocolError::MalformedEndpoint(String::from_utf8_lossy(address).into_owned())
        })?;

        Ok(Self {
            host: String::from_utf8_lossy(&address[..sep]).into_owned(),
            port: String::from_utf8_lossy(&address[sep + 1..]).into_owned(),
        })
    }

    /// The endpoint in `host:port` form for address resolution.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
