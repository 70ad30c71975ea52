use axum::Router;
use tokio::net::TcpListener;

use std::{future::Future, io, sync::Arc};

use crate::service::NoteService;

/// Serves `router` on `listener` until `shutdown` resolves, then drains
/// in-flight requests and closes storage.
pub async fn run(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
    service: Arc<NoteService>,
) -> io::Result<()> {
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    tracing::info!("HTTP server stopped, closing storage");
    service.close();

    result
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        tracing::info!(signal = "SIGINT", "Received shutdown signal");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        tracing::info!(signal = "SIGTERM", "Received shutdown signal");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
