/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use pleat_server::PleatServer;

/// Re-export pleat-server core for convenience
pub use pleat_server;

/// Extension trait that converts a `PleatServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for PleatServer {
  fn into_axum_router(self) -> axum::Router {
    let parts = self.into_parts();
    handler::build_router(parts.routes, parts.page_fallback)
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(port = local_addr.port(), "pleat backend listening");
    axum::serve(listener, router).await?;
    Ok(())
  }
}
