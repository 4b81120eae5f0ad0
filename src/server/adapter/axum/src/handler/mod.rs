/* src/server/adapter/axum/src/handler/mod.rs */

mod prefetch;


use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use pleat_server::route::{PageFallbackFn, RouteDef};

pub(crate) struct AppState {
  pub routes: HashMap<String, Arc<RouteDef>>,
  pub page_fallback: Option<PageFallbackFn>,
}

pub(crate) fn build_router(routes: Vec<RouteDef>, page_fallback: Option<PageFallbackFn>) -> Router {
  let mut route_map = HashMap::new();
  let mut router = Router::new();

  // One GET route per page pattern. Prefetch requests and standard page
  // requests share the pattern; the handler splits on the marker headers.
  for route in routes {
    let pattern = route.pattern.clone();
    route_map.insert(pattern.clone(), Arc::new(route));
    router = router.route(&pattern, get(prefetch::handle_prefetch));
  }

  let state = Arc::new(AppState { routes: route_map, page_fallback });
  router.with_state(state)
}
