//! ftserve - Entry Point
//!
//! A dial-back file transfer server: a client requests a directory listing
//! or a named file over a control connection, and the server delivers the
//! payload over a second connection dialed back to the client.

use log::info;
use std::env;
use std::process;

use ftserve::Server;
use ftserve::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let port = parse_port_arg();

    let config = match ServerConfig::load(port) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("SERVER: Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    info!("Launching transfer server...");
    let server = Server::new(config).await;

    println!("Server open on port {}", port);
    server.start().await;
}

/// The single startup parameter: a positive integer TCP port.
fn parse_port_arg() -> u16 {
    let arg = match env::args().nth(1) {
        Some(arg) => arg,
        None => {
            eprintln!("SERVER: Not enough parameters. Usage 'ftserve [PORT]'");
            process::exit(1);
        }
    };

    match arg.parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            eprintln!("SERVER: Port must be an integer greater than zero");
            process::exit(1);
        }
    }
}
