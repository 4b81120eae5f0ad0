/* demos/standalone/server-rust/src/main.rs */

mod routes;

use std::env;

use pleat_server::PleatServer;
use pleat_server_axum::IntoAxumRouter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
  let addr = format!("0.0.0.0:{port}");

  let mut server = PleatServer::new().page_fallback(routes::page_fallback());

  // Prefer prerendered build output when present; otherwise the built-in
  // demo routes.
  let build_dir = env::var("PLEAT_OUTPUT_DIR").unwrap_or_else(|_| ".pleat/output".to_string());
  match pleat_server::load_build_output(&build_dir) {
    Ok(loaded) => {
      tracing::info!(routes = loaded.len(), dir = %build_dir, "loaded build output");
      for route in loaded {
        server = server.route(route);
      }
    }
    Err(e) => {
      tracing::info!(dir = %build_dir, error = %e, "no build output, using built-in routes");
      for route in routes::app_routes() {
        server = server.route(route);
      }
    }
  }

  server.serve(&addr).await
}
