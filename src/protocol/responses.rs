//! Wire literals
//!
//! The exact byte strings exchanged on the control and data connections.

/// Acknowledgement sent on the control connection after a valid command,
/// and expected from the receiver during the framing handshake.
pub const ACK: &[u8] = b"ACK";

/// Rejection sent on the control connection for an unparseable command.
pub const INVALID_COMMAND: &[u8] = b"INVALID COMMAND";

/// Out-of-band status sent unframed on the data connection when a requested
/// file cannot be opened.
pub const FILE_NOT_FOUND: &[u8] = b"FILE NOT FOUND";
