/* src/server/core/rust/src/server.rs */

use crate::route::{PageFallbackFn, RouteDef};

/// Framework-agnostic parts extracted from `PleatServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct PleatParts {
  pub routes: Vec<RouteDef>,
  pub page_fallback: Option<PageFallbackFn>,
}

pub struct PleatServer {
  routes: Vec<RouteDef>,
  page_fallback: Option<PageFallbackFn>,
}

impl PleatServer {
  pub fn new() -> Self {
    Self { routes: Vec::new(), page_fallback: None }
  }

  pub fn route(mut self, route: RouteDef) -> Self {
    self.routes.push(route);
    self
  }

  /// Handler for requests without the segment-prefetch marker (the
  /// standard page path). Without one, such requests get a plain 404.
  pub fn page_fallback(mut self, fallback: PageFallbackFn) -> Self {
    self.page_fallback = Some(fallback);
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  pub fn into_parts(self) -> PleatParts {
    PleatParts { routes: self.routes, page_fallback: self.page_fallback }
  }
}

impl Default for PleatServer {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::route::{SegmentDef, SegmentKind};

  #[test]
  fn into_parts_keeps_registration_order() {
    let parts = PleatServer::new()
      .route(RouteDef { pattern: "/a".into(), root: SegmentDef::new(SegmentKind::Root) })
      .route(RouteDef { pattern: "/b".into(), root: SegmentDef::new(SegmentKind::Root) })
      .into_parts();
    let patterns: Vec<&str> = parts.routes.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, ["/a", "/b"]);
    assert!(parts.page_fallback.is_none());
  }

  #[test]
  fn page_fallback_is_carried_through() {
    let parts = PleatServer::new()
      .page_fallback(Arc::new(|_ctx| Box::pin(async { Ok("<html></html>".to_string()) })))
      .into_parts();
    assert!(parts.page_fallback.is_some());
  }
}
