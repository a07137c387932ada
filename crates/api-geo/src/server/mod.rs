pub mod browser;
pub mod error;

use crate::config::WebConfig;
use crate::router::make_app;
use axum::Router;
use core_executor::Database;
use error::{self as server_error, ServerResult};
use snafu::ResultExt;
use std::fmt;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use tokio::sync::oneshot;

/// A server running on its own thread with its own runtime.
///
/// Stopping signals a graceful shutdown and blocks until the thread exits. Dropping the
/// handle stops the server.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<std::io::Result<()>>>,
}

impl ServerHandle {
    /// Binds `host:port` on the calling thread, so bind errors are reported here, then
    /// serves `app` in the background. Port 0 picks a free port.
    pub fn spawn(app: Router, host: &str, port: u16) -> ServerResult<Self> {
        let addr = format!("{host}:{port}");
        let listener = std::net::TcpListener::bind((host, port))
            .context(server_error::BindSnafu { addr: addr.clone() })?;
        listener
            .set_nonblocking(true)
            .context(server_error::BindSnafu { addr: addr.clone() })?;
        let local_addr = listener
            .local_addr()
            .context(server_error::BindSnafu { addr })?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("geoscope-worker")
            .enable_all()
            .build()
            .context(server_error::RuntimeSnafu)?;
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("geoscope-server".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = tokio::net::TcpListener::from_std(listener)?;
                    tracing::info!("Listening on http://{}", local_addr);
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async {
                            // A dropped sender also means shutdown.
                            let _ = shutdown_rx.await;
                        })
                        .await
                })
            })
            .context(server_error::SpawnSnafu)?;

        Ok(Self {
            addr: local_addr,
            shutdown: Some(shutdown),
            thread: Some(thread),
        })
    }

    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Idempotent.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let Some(thread) = self.thread.take() else {
            return;
        };
        match thread.join() {
            Ok(Ok(())) => tracing::info!(addr = %self.addr, "Server stopped"),
            Ok(Err(err)) => tracing::error!(addr = %self.addr, error = %err, "Server failed"),
            Err(_) => tracing::error!(addr = %self.addr, "Server thread panicked"),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerHandle")
            .field("addr", &self.addr)
            .field("running", &self.thread.is_some())
            .finish()
    }
}

/// Owns the process-wide server slot: at most one server runs at a time.
///
/// Must not be driven from a request served by the server it controls, since stopping joins
/// the serving thread.
pub struct ServerController {
    db: Database,
    config: WebConfig,
    slot: Mutex<Option<ServerHandle>>,
}

impl ServerController {
    /// `config` supplies the settings that are not part of a start request, such as CORS and
    /// browser launch.
    #[must_use]
    pub const fn new(db: Database, config: WebConfig) -> Self {
        Self {
            db,
            config,
            slot: Mutex::new(None),
        }
    }

    /// Starts serving on `host:port`, replacing any running server.
    #[tracing::instrument(name = "ServerController::start", level = "debug", skip(self), err)]
    pub fn start(&self, host: &str, port: u16) -> ServerResult<String> {
        let mut slot = self.lock();
        if let Some(mut previous) = slot.take() {
            previous.stop();
        }

        let config = self.config.with_address(host, port);
        let app = make_app(self.db.clone(), &config)?;
        let handle = ServerHandle::spawn(app, host, port)?;
        let port = handle.local_addr().port();
        *slot = Some(handle);
        drop(slot);

        if config.open_browser {
            browser::open(&browser::local_url(port));
        }
        Ok(format!("Server started on {host}:{port}"))
    }

    #[tracing::instrument(name = "ServerController::stop", level = "debug", skip(self))]
    pub fn stop(&self) -> String {
        let mut slot = self.lock();
        match slot.take() {
            Some(mut handle) => {
                handle.stop();
                "Server stopped".to_string()
            }
            None => "No server running".to_string(),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().is_some()
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.lock().as_ref().map(ServerHandle::local_addr)
    }

    fn lock(&self) -> MutexGuard<'_, Option<ServerHandle>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ServerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerController")
            .field("config", &self.config)
            .field("server", &self.local_addr())
            .finish_non_exhaustive()
    }
}
