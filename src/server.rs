//! Serving loop with a bounded graceful drain.

use axum::Router;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinError;

/// Serve `app` until `signal` resolves, then stop accepting connections and
/// give in-flight requests up to `drain` to finish.
///
/// Returns as soon as the last connection closes; connections still open
/// when `drain` elapses are dropped.
pub async fn serve_with_drain<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => return flatten(joined),
        _ = signal => {}
    }

    let _ = drain_tx.send(());
    tracing::info!(timeout_ms = drain.as_millis() as u64, "Draining connections...");

    match tokio::time::timeout(drain, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!(
                timeout_ms = drain.as_millis() as u64,
                "Drain timeout elapsed, dropping remaining connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn flatten(joined: Result<std::io::Result<()>, JoinError>) -> std::io::Result<()> {
    joined.map_err(std::io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_idle_server_stops_without_waiting_for_drain() {
        let app = Router::new().route("/health", get(|| async { "ok" }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let begun = Instant::now();
        serve_with_drain(listener, app, async {}, Duration::from_secs(30))
            .await
            .unwrap();

        assert!(begun.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_stuck_request_is_cut_off_after_drain() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "done"
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (sent_tx, sent_rx) = tokio::sync::oneshot::channel::<()>();
        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .await
                .unwrap();
            let _ = sent_tx.send(());
            let mut buf = Vec::new();
            let _ = stream.read_to_end(&mut buf).await;
        });

        let signal = async move {
            let _ = sent_rx.await;
            tokio::time::sleep(Duration::from_millis(50)).await;
        };

        let begun = Instant::now();
        serve_with_drain(listener, app, signal, Duration::from_millis(200))
            .await
            .unwrap();

        assert!(begun.elapsed() < Duration::from_secs(5));
        client.abort();
    }
}
