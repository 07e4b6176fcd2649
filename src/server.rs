//! HTTP server, request dispatch, and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()` — no new connections.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], letting `main` exit cleanly.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::app::App;
use crate::error::Result;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`
    /// against the shared `app` state.
    ///
    /// Returns only after a full graceful shutdown: a signal, followed by
    /// all in-flight requests completing.
    pub async fn serve(self, router: Router, app: Arc<App>) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        let router = Arc::new(router);

        info!(addr = %self.addr, "stockroom listening");

        // JoinSet tracks every spawned connection task so shutdown can wait
        // for all of them.
        let mut tasks = tokio::task::JoinSet::new();

        // Pinned so the loop can poll the same future on every iteration.
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` checks arms top-to-bottom: a signal stops the
                // accept loop even when connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let app = Arc::clone(&app);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection, not
                        // once per connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            let app = Arc::clone(&app);
                            async move { dispatch(router, app, req).await }
                        });

                        // The auto builder speaks both HTTP/1.1 and HTTP/2,
                        // whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not
                // grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection before returning.
        while tasks.join_next().await.is_some() {}

        info!("stockroom stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// The error type is [`Infallible`]: every failure becomes an HTTP status
/// here (400, 404, 500), so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    app: Arc<App>,
    req: hyper::Request<hyper::body::Incoming>,
) -> std::result::Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let method = parts.method;
    let path = parts.uri.path().to_owned();

    let (handler, params) = match router.lookup(&method, &path) {
        Some(matched) => matched,
        None => match router.fallback_handler() {
            Some(handler) => (handler, HashMap::new()),
            None => {
                return Ok(Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .text("not found")
                    .into_inner());
            }
        },
    };

    // The whole body is collected up front; handlers see plain bytes.
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!(%method, path, "failed to read request body: {e}");
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .text("malformed request body")
                .into_inner());
        }
    };

    let request = Request::new(method.clone(), path.clone(), parts.headers, body, params);
    let response = match handler.call(app, request).await {
        Ok(response) => response,
        Err(e) => {
            if e.status().is_server_error() {
                error!(%method, path, "request failed: {e}");
            }
            e.into_response()
        }
    };

    debug!(%method, path, status = response.status.as_u16(), "request");
    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both SIGTERM and SIGINT (Ctrl-C). On other
/// platforms only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` never resolves — the SIGTERM arm is effectively disabled
    // off Unix.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
