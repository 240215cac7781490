use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::validate::Validator;
use crate::log::{Event, EventLog};

/// A bound listener serving one connection at a time.
pub struct Server {
    listener: TcpListener,
    validator: Validator,
    read_buffer_size: usize,
}

impl Server {
    /// Binds the configured address. When the configured port is 0 the
    /// kernel picks one, and Host headers are checked against that port.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let ip = cfg.server.bind_ip()?;
        let listener = TcpListener::bind((ip, cfg.server.port)).await?;

        let mut server = cfg.server.clone();
        server.port = listener.local_addr()?.port();

        Ok(Self {
            listener,
            validator: Validator::new(&server),
            read_buffer_size: cfg.read_buffer_size,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, finishing each before taking the next.
    ///
    /// A connection that fails is logged and dropped; the loop keeps going.
    pub async fn run(&self, log: &dyn EventLog) -> anyhow::Result<()> {
        let addr = self.local_addr()?;
        info!("Listening on {}", addr);
        log.record(&Event::ServerStarted {
            address: addr.to_string(),
        });

        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::error!("Accept error: {}", e);
                    log.record(&Event::ConnectionFailed {
                        reason: format!("accept: {}", e),
                    });
                    if let Some(pause) = accept_backoff(&e) {
                        tokio::time::sleep(pause).await;
                    }
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let mut conn = Connection::new(socket, self.read_buffer_size, &self.validator, log);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
                log.record(&Event::ConnectionFailed {
                    reason: format!("{}: {:#}", peer, e),
                });
            }
        }
    }
}

/// How long to wait before accepting again after a failed accept.
///
/// A peer that reset or aborted before it was accepted only affects itself.
/// Anything else, such as running out of file descriptors, is given a moment
/// to clear instead of spinning.
fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::Interrupted => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Binds per `cfg` and serves until the task is dropped.
pub async fn run(cfg: &Config, log: &dyn EventLog) -> anyhow::Result<()> {
    Server::bind(cfg).await?.run(log).await
}
