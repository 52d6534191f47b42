//! Module `handler`
//!
//! Drives one control connection through its full request/response cycle:
//! receive and validate the command, acknowledge or reject it, receive the
//! dial-back endpoint, open the data connection, and send the selected
//! payload through the framing layer.

use log::info;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::error::{ProtocolError, ServerError, StorageError};
use crate::protocol::responses::{ACK, FILE_NOT_FOUND, INVALID_COMMAND};
use crate::protocol::{Command, Endpoint, parse_command};
use crate::session::Session;
use crate::storage::{list_directory, read_file_contents};
use crate::transfer::{connect_with_retry, send_framed, send_status};

/// Control command buffer: 1023 usable bytes plus terminator.
const COMMAND_BUF_SIZE: usize = 1024;

/// Endpoint address buffer: 127 usable bytes plus terminator.
const ADDRESS_BUF_SIZE: usize = 128;

/// Runs one session to completion.
///
/// The control stream is closed by the caller after this returns, success
/// or failure. A failure aborts only this session; the accept loop keeps
/// serving subsequent connections.
pub async fn handle_session(
    cmd_stream: &mut TcpStream,
    peer_addr: SocketAddr,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    // A command arrives in a single read; fragments are not reassembled.
    let mut buffer = [0u8; COMMAND_BUF_SIZE];
    let n = cmd_stream.read(&mut buffer[..COMMAND_BUF_SIZE - 1]).await?;
    if n == 0 {
        return Err(disconnected("before sending a command"));
    }

    let command = match parse_command(&buffer[..n]) {
        Command::Invalid => {
            cmd_stream.write_all(INVALID_COMMAND).await?;
            let text = String::from_utf8_lossy(&buffer[..n]).into_owned();
            return Err(ProtocolError::InvalidCommand(text).into());
        }
        command => command,
    };

    cmd_stream.write_all(ACK).await?;

    let mut buffer = [0u8; ADDRESS_BUF_SIZE];
    let n = cmd_stream.read(&mut buffer[..ADDRESS_BUF_SIZE - 1]).await?;
    if n == 0 {
        return Err(disconnected("before advertising a data endpoint"));
    }
    let endpoint = Endpoint::parse(&buffer[..n])?;

    info!("Connection from {}", endpoint.host);

    let session = Session::new(peer_addr, command, endpoint);

    // The client binds its listener before advertising the endpoint, so a
    // failed dial means it is not up yet; retry with bounded backoff.
    let mut data_stream = connect_with_retry(
        session.endpoint(),
        config.dial_attempts,
        config.dial_backoff(),
    )
    .await?;

    match session.command() {
        Command::List => {
            info!(
                "List directory requested on port {}",
                session.endpoint().port
            );
            let listing = list_directory(&config.server_root_path())?;
            info!(
                "Sending directory contents to {}",
                session.endpoint().authority()
            );
            send_framed(&mut data_stream, &listing).await?;
        }
        Command::Get(filename) => {
            info!(
                "File \"{}\" requested on port {}",
                filename,
                session.endpoint().port
            );
            match read_file_contents(&config.server_root_path(), filename) {
                Ok(contents) => {
                    info!(
                        "Sending \"{}\" to {}",
                        filename,
                        session.endpoint().authority()
                    );
                    send_framed(&mut data_stream, &contents).await?;
                }
                Err(StorageError::FileNotFound(_)) => {
                    info!("File not found or inaccessible. Sending error message.");
                    send_status(&mut data_stream, FILE_NOT_FOUND).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        // Invalid commands are rejected before a session is built.
        Command::Invalid => {}
    }

    let _ = data_stream.shutdown().await;

    Ok(())
}

fn disconnected(when: &str) -> ServerError {
    ServerError::IoError(io::Error::new(
        io::ErrorKind::ConnectionAborted,
        format!("Client disconnected {}", when),
    ))
}
