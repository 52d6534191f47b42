//! Error types
//!
//! Defines domain-specific error types for each stage of a transfer session.

use std::fmt;
use std::io;

/// Control-connection protocol errors
#[derive(Debug)]
pub enum ProtocolError {
    InvalidCommand(String),
    MalformedEndpoint(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            ProtocolError::MalformedEndpoint(a) => {
                write!(f, "Malformed data endpoint address: {}", a)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Payload producer errors
#[derive(Debug)]
pub enum StorageError {
    FileNotFound(String),
    DirectoryUnreadable(String, io::Error),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::FileNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::DirectoryUnreadable(p, e) => {
                write!(f, "Failed to read directory {}: {}", p, e)
            }
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Data channel and framing errors
#[derive(Debug)]
pub enum TransferError {
    DialFailed { host: String, port: String },
    AckMismatch(Vec<u8>),
    ConnectionClosed,
    TransferFailed(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::DialFailed { host, port } => {
                write!(
                    f,
                    "Failed to connect for data connection to {}:{}",
                    host, port
                )
            }
            TransferError::AckMismatch(got) => {
                write!(f, "Receiver did not acknowledge frame: {:?}", got)
            }
            TransferError::ConnectionClosed => write!(f, "Data connection closed mid-transfer"),
            TransferError::TransferFailed(e) => write!(f, "Transfer failed: {}", e),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<io::Error> for TransferError {
    fn from(error: io::Error) -> Self {
        TransferError::TransferFailed(error)
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum ServerError {
    Protocol(ProtocolError),
    Storage(StorageError),
    Transfer(TransferError),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Protocol(e) => write!(f, "Protocol error: {}", e),
            ServerError::Storage(e) => write!(f, "Storage error: {}", e),
            ServerError::Transfer(e) => write!(f, "Transfer error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<ProtocolError> for ServerError {
    fn from(error: ProtocolError) -> Self {
        ServerError::Protocol(error)
    }
}

impl From<StorageError> for ServerError {
    fn from(error: StorageError) -> Self {
        ServerError::Storage(error)
    }
}

impl From<TransferError> for ServerError {
    fn from(error: TransferError) -> Self {
        ServerError::Transfer(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
