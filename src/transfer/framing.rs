//! Module `framing`
//!
//! Length-prefixed framing for the data connection. A payload is announced
//! with a decimal ASCII length header, the receiver answers with a short
//! acknowledgement, and only then does the payload itself flow. A frame
//! has no end-of-payload marker; the receiver already knows the length
//! from the header.

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::TransferError;
use crate::protocol::responses::ACK;

/// Upper bound on a single header read. The header has no terminator; this
/// bounded read is what delimits it.
const HEADER_BUF_SIZE: usize = 127;

/// The acknowledgement may arrive bare or NUL-terminated.
const ACK_BUF_SIZE: usize = 4;

/// A message received on the data connection.
///
/// `Payload` carries framed bytes. `Status` carries an out-of-band literal
/// sent in place of a frame, such as the not-found notice for a missing
/// file; no acknowledgement is exchanged for it.
#[derive(Debug, Clone, PartialEq)]
pub enum DataMessage {
    Payload(Vec<u8>),
    Status(String),
}

/// Sends `payload` as one framed message.
///
/// Writes the decimal length header, waits for the receiver's
/// acknowledgement, then transmits the payload. Nothing of the payload is
/// written unless the acknowledgement matches.
pub async fn send_framed<S>(conn: &mut S, payload: &[u8]) -> Result<(), TransferError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let header = payload.len().to_string();
    conn.write_all(header.as_bytes()).await?;
    conn.flush().await?;

    let mut ack = [0u8; ACK_BUF_SIZE];
    let n = conn.read(&mut ack).await?;
    if !ack_matches(&ack[..n]) {
        warn!("Receiver refused frame header: {:?}", &ack[..n]);
        return Err(TransferError::AckMismatch(ack[..n].to_vec()));
    }

    // Partial writes resume from the unsent tail; the offset advances,
    // the buffer is never restarted.
    let mut sent = 0;
    while sent < payload.len() {
        let n = conn.write(&payload[sent..]).await?;
        if n == 0 {
            return Err(TransferError::ConnectionClosed);
        }
        sent += n;
    }
    conn.flush().await?;

    debug!("Sent framed payload of {} bytes", payload.len());
    Ok(())
}

/// Sends an unframed status literal on the data connection.
///
/// Status messages bypass the header and acknowledgement entirely; the
/// receiver recognizes them by their non-numeric leading bytes.
pub async fn send_status<S>(conn: &mut S, status: &[u8]) -> Result<(), TransferError>
where
    S: AsyncWrite + Unpin,
{
    conn.write_all(status).await?;
    conn.flush().await?;
    Ok(())
}

/// Receives one message from the data connection.
///
/// A numeric header is acknowledged and followed by exactly that many
/// payload bytes. Anything else is the complete message itself, returned
/// as a status. The sender holds the payload until the acknowledgement, so
/// the header read never captures payload bytes.
pub async fn recv_message<S>(conn: &mut S) -> Result<DataMessage, TransferError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut header = [0u8; HEADER_BUF_SIZE];
    let n = conn.read(&mut header).await?;
    if n == 0 {
        return Err(TransferError::ConnectionClosed);
    }

    let end = header[..n].iter().position(|&b| b == 0).unwrap_or(n);
    let text = String::from_utf8_lossy(&header[..end]).into_owned();

    match text.parse::<usize>() {
        Ok(length) => {
            conn.write_all(ACK).await?;
            conn.flush().await?;

            let mut payload = vec![0u8; length];
            conn.read_exact(&mut payload).await?;
            Ok(DataMessage::Payload(payload))
        }
        Err(_) => Ok(DataMessage::Status(text)),
    }
}

fn ack_matches(received: &[u8]) -> bool {
    received == ACK || (received.len() == ACK.len() + 1 && &received[..3] == ACK && received[3] == 0)
}
