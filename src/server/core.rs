use log::{error, info, warn};
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::session::handle_session;

pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Binds the control listener. Failure to bind is fatal; no server
    /// identity exists without the listening socket.
    pub async fn new(config: ServerConfig) -> Self {
        let socket = config.control_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        if !config.server_root_path().is_dir() {
            warn!(
                "Server root {} is not a readable directory",
                config.server_root_str()
            );
        } else {
            info!("Serving files from {}", config.server_root_str());
        }

        Self { listener, config }
    }

    /// Local address of the bound control listener.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts and serves control connections until the process exits.
    ///
    /// Sessions run strictly one at a time; the next connection is not
    /// accepted until the current session has been processed to completion
    /// and its control stream closed.
    pub async fn start(&self) {
        loop {
            match self.listener.accept().await {
                Ok((mut stream, addr)) => {
                    info!("New connection: {}", addr);

                    if let Err(e) = handle_session(&mut stream, addr, &self.config).await {
                        warn!("Session with {} failed: {}", addr, e);
                    }

                    // The control connection is closed here regardless of
                    // how the session ended.
                    let _ = stream.shutdown().await;
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
