//! Transfer module
//!
//! Handles the dial-back data channel and the length-prefixed framing used
//! to move payloads across it.

pub mod data_channel;
pub mod framing;

pub use data_channel::{connect_for_data, connect_with_retry};
pub use framing::{DataMessage, recv_message, send_framed, send_status};
