//! HTTP/HTTPS serving with bounded graceful shutdown.
//!
//! On SIGINT/SIGTERM the server stops accepting connections and gives
//! in-flight requests up to the configured drain interval to finish.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::{ServerConfig, TlsPaths};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS configuration error: {0}")]
    Tls(String),
}

/// Serve `app` on `listener`, over TLS when the configuration has a
/// certificate and key, until a shutdown signal arrives.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    match &config.tls {
        Some(paths) => {
            let tls = load_tls_config(paths)?;
            tracing::info!(cert = %paths.cert_file.display(), "TLS enabled");
            serve_tls(listener, app, tls, config.drain_interval).await
        }
        None => serve_plain(listener, app, config.drain_interval).await,
    }
}

async fn serve_plain(
    listener: TcpListener,
    app: Router,
    drain: Duration,
) -> Result<(), ServerError> {
    let cancel = CancellationToken::new();
    let server_cancel = cancel.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { server_cancel.cancelled().await })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => return result.map_err(ServerError::from),
        () = shutdown_signal() => {}
    }

    cancel.cancel();
    match tokio::time::timeout(drain, server).await {
        Ok(result) => result?,
        Err(_) => tracing::warn!(?drain, "Drain interval elapsed with requests still in flight"),
    }
    Ok(())
}

async fn serve_tls(
    listener: TcpListener,
    app: Router,
    tls: Arc<rustls::ServerConfig>,
    drain: Duration,
) -> Result<(), ServerError> {
    let acceptor = TlsAcceptor::from(tls);
    let tracker = TaskTracker::new();
    let cancel = CancellationToken::new();
    let mut signal = std::pin::pin!(shutdown_signal());

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::debug!(error = %e, "Accept error");
                        continue;
                    }
                };
                tracker.spawn(handle_tls_connection(
                    stream,
                    peer,
                    acceptor.clone(),
                    app.clone(),
                    cancel.clone(),
                ));
            }
            () = &mut signal => break,
        }
    }

    cancel.cancel();
    tracker.close();
    if tokio::time::timeout(drain, tracker.wait()).await.is_err() {
        tracing::warn!(?drain, "Drain interval elapsed with connections still open");
    }
    Ok(())
}

async fn handle_tls_connection(
    stream: TcpStream,
    peer: SocketAddr,
    acceptor: TlsAcceptor,
    app: Router,
    cancel: CancellationToken,
) {
    let tls_stream = match acceptor.accept(stream).await {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(%peer, error = %e, "TLS handshake failed");
            return;
        }
    };

    let io = TokioIo::new(tls_stream);
    let service = TowerToHyperService::new(app);
    let conn = hyper::server::conn::http1::Builder::new().serve_connection(io, service);
    let mut conn = std::pin::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => {
            if let Err(e) = result {
                tracing::debug!(%peer, error = %e, "Connection error");
            }
        }
        () = cancel.cancelled() => {
            conn.as_mut().graceful_shutdown();
            if let Err(e) = conn.await {
                tracing::debug!(%peer, error = %e, "Connection error during shutdown");
            }
        }
    }
}

/// Build a rustls server configuration from PEM certificate and key files.
pub fn load_tls_config(paths: &TlsPaths) -> Result<Arc<rustls::ServerConfig>, ServerError> {
    let certs = CertificateDer::pem_file_iter(&paths.cert_file)
        .and_then(|iter| iter.collect::<Result<Vec<_>, _>>())
        .map_err(|e| {
            ServerError::Tls(format!(
                "cannot read certificates from {}: {e}",
                paths.cert_file.display()
            ))
        })?;
    if certs.is_empty() {
        return Err(ServerError::Tls(format!(
            "no certificates found in {}",
            paths.cert_file.display()
        )));
    }

    let key = PrivateKeyDer::from_pem_file(&paths.key_file).map_err(|e| {
        ServerError::Tls(format!(
            "cannot read private key from {}: {e}",
            paths.key_file.display()
        ))
    })?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| ServerError::Tls(e.to_string()))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| ServerError::Tls(e.to_string()))?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
