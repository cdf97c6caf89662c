//! # insight-server
//!
//! HTTP boundary for [`insight`]: `POST /analyze` with `{"filePath": "..."}`
//! returns the file's insight report plus its `fileContent`.
//!
//! ## Routes
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | POST | `/analyze` | report JSON, or `{ error, details }` |
//! | POST | `/api/comprehensive-file-insights` | alias of `/analyze` |
//! | GET | `/health` | `{ "status": "ok", "version": ... }` |
//!
//! `filePath` is resolved against the project root and must stay inside it
//! after symlinks are followed (403 otherwise).

pub mod http;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

pub use routes::AppState;

use http::{RequestError, read_request, write_response};
use routes::{error_response, route};

const DRAIN_LIMIT_BYTES: u64 = 1024 * 1024;
const DRAIN_TIMEOUT: Duration = Duration::from_millis(250);
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accept connections forever, one task per connection.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    info!(
        addr = %listener.local_addr()?,
        root = %state.root.display(),
        "insight-server listening"
    );
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                let pause = accept_backoff(&e);
                warn!(error = %e, ?pause, "accept failed");
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                continue;
            }
        };
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer, state).await {
                debug!(%peer, error = %e, "connection ended with error");
            }
        });
    }
}

/// How long to wait before accepting again after a failed accept.
///
/// A peer that gave up mid-handshake costs nothing; anything else (fd
/// exhaustion, buffer pressure) gets a pause so the loop does not spin.
fn accept_backoff(error: &std::io::Error) -> Duration {
    use std::io::ErrorKind;
    match error.kind() {
        ErrorKind::ConnectionAborted | ErrorKind::ConnectionReset | ErrorKind::Interrupted => {
            Duration::ZERO
        }
        _ => ACCEPT_BACKOFF,
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState>,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut rejected = false;
    let response = match read_request(&mut reader, state.max_body_bytes).await {
        Ok(request) => {
            let method = request.method.clone();
            let path = request.path.clone();
            let response = route(state, request).await;
            info!(%peer, %method, %path, status = response.status, "request");
            response
        }
        Err(RequestError::Closed) => return Ok(()),
        Err(RequestError::Io(e)) => return Err(e),
        Err(e @ RequestError::TooLarge { .. }) => {
            warn!(%peer, error = %e, "request rejected");
            rejected = true;
            error_response(413, "Payload too large", e.to_string())
        }
        Err(e @ RequestError::Malformed(_)) => {
            warn!(%peer, error = %e, "request rejected");
            rejected = true;
            error_response(400, "Bad request", e.to_string())
        }
    };

    write_response(&mut write_half, &response).await?;
    write_half.shutdown().await?;

    // Closing with unread input resets the connection and can destroy the
    // response in flight, so swallow what the client already sent.
    if rejected {
        let mut rest = reader.take(DRAIN_LIMIT_BYTES);
        let _ = tokio::time::timeout(DRAIN_TIMEOUT, tokio::io::copy(&mut rest, &mut tokio::io::sink())).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_accept_backoff_by_error_kind() {
        assert_eq!(accept_backoff(&Error::from(ErrorKind::ConnectionAborted)), Duration::ZERO);
        assert_eq!(accept_backoff(&Error::from(ErrorKind::Interrupted)), Duration::ZERO);
        // EMFILE
        assert_eq!(accept_backoff(&Error::from_raw_os_error(24)), ACCEPT_BACKOFF);
        assert_eq!(accept_backoff(&Error::from(ErrorKind::OutOfMemory)), ACCEPT_BACKOFF);
    }
}
