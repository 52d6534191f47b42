//! ftclient - dial-back transfer client
//!
//! Connects to a server's control port, requests a directory listing or a
//! file, then receives the payload on a listener it binds before
//! advertising its address. Listings are printed; files are saved under a
//! `recvd_` prefix.

use std::env;
use std::process;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

use ftserve::transfer::{DataMessage, recv_message};

const ACCEPT_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() {
    env_logger::init();

    let (host, control_port, command, data_port) = parse_args();

    let mut control = match TcpStream::connect((host.as_str(), control_port)).await {
        Ok(stream) => stream,
        Err(e) => die(&format!(
            "CLIENT: Failed to connect to {}:{}: {}",
            host, control_port, e
        )),
    };

    if let Err(e) = control.write_all(format!("{}\0", command).as_bytes()).await {
        die(&format!("CLIENT: Failed to send command: {}", e));
    }

    let mut buffer = [0u8; 1024];
    let n = match control.read(&mut buffer).await {
        Ok(0) => die("CLIENT: Server closed the control connection"),
        Ok(n) => n,
        Err(e) => die(&format!("CLIENT: Failed to read response: {}", e)),
    };

    if &buffer[..n] != b"ACK" {
        println!(
            "{}:{} says {}",
            host,
            control_port,
            String::from_utf8_lossy(&buffer[..n])
        );
        return;
    }

    // Bind before advertising so the server's dial finds us listening.
    let listener = match TcpListener::bind(("0.0.0.0", data_port)).await {
        Ok(listener) => listener,
        Err(e) => die(&format!(
            "CLIENT: Failed to bind data port {}: {}",
            data_port, e
        )),
    };

    let local_ip = match control.local_addr() {
        Ok(addr) => addr.ip(),
        Err(e) => die(&format!("CLIENT: Failed to get local address: {}", e)),
    };

    if let Err(e) = control
        .write_all(format!("{}|{}\0", local_ip, data_port).as_bytes())
        .await
    {
        die(&format!("CLIENT: Failed to send data endpoint: {}", e));
    }

    let (mut data_conn, _) = match timeout(ACCEPT_TIMEOUT, listener.accept()).await {
        Ok(Ok(conn)) => conn,
        _ => die("CLIENT: Data connection failed."),
    };

    match recv_message(&mut data_conn).await {
        Ok(DataMessage::Payload(payload)) => {
            if command.starts_with("-l") {
                println!("Receiving directory contents.");
                println!("{}", String::from_utf8_lossy(&payload));
            } else {
                let filename = command[3..].to_string();
                let saved = format!("recvd_{}", filename);
                println!("Receiving \"{}\". Saving file to \"{}\"", filename, saved);
                if let Err(e) = tokio::fs::write(&saved, &payload).await {
                    die(&format!("CLIENT: Failed to write {}: {}", saved, e));
                }
                println!("File transfer complete.");
            }
        }
        Ok(DataMessage::Status(text)) => {
            println!("ERROR. Server says \"{}\".", text);
        }
        Err(e) => die(&format!("CLIENT: Failed to receive data: {}", e)),
    }
}

/// Usage:
///   ftclient [HOST] [CONTROL PORT] -l [DATA PORT]
///   ftclient [HOST] [CONTROL PORT] -g [FILENAME] [DATA PORT]
fn parse_args() -> (String, u16, String, u16) {
    let args: Vec<String> = env::args().collect();

    let command = match args.len() {
        5 => args[3].clone(),
        6 => format!("{} {}", args[3], args[4]),
        _ => die(
            "CLIENT: Usage error. Proper usage is\n'ftclient [HOST] [CONTROL PORT] -g [FILENAME] [DATA PORT]' or\n'ftclient [HOST] [CONTROL PORT] -l [DATA PORT]'",
        ),
    };

    let control_port = parse_port(&args[2]);
    let data_port = parse_port(&args[args.len() - 1]);

    (args[1].clone(), control_port, command, data_port)
}

fn parse_port(arg: &str) -> u16 {
    match arg.parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => die("CLIENT: Usage error. CONTROL PORT and DATA PORT must be integers"),
    }
}

fn die(msg: &str) -> ! {
    eprintln!("{}", msg);
    process::exit(1);
}
