/* src/server/core/rust/src/route.rs */

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::PleatError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Identity of one segment within its parent. Encoded keys are stable for a
/// given route definition: the same key always names the same segment,
/// regardless of which request produced the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
  /// The tree root (`/` in segment-path syntax).
  Root,
  /// A statically named segment, addressable by its literal name.
  Static(String),
  /// A dynamically keyed segment bound to a route param. Addressable only
  /// together with the access token issued in its parent's payload.
  Dynamic(String),
  /// The page leaf of a route.
  Page,
}

impl SegmentKind {
  /// Encoded path component: `name`, `$param` or `_page`. The root encodes
  /// to `/` and never appears as a component of a longer path.
  pub fn encode(&self) -> String {
    match self {
      SegmentKind::Root => "/".to_string(),
      SegmentKind::Static(name) => name.clone(),
      SegmentKind::Dynamic(param) => format!("${param}"),
      SegmentKind::Page => "_page".to_string(),
    }
  }

  pub fn is_dynamic(&self) -> bool {
    matches!(self, SegmentKind::Dynamic(_))
  }
}

/// Request context passed to a segment's render closure.
///
/// Params are limited to those bound on the segment's own path prefix; an
/// ancestor never sees a descendant's params, so a segment shared between
/// two pages renders identically no matter which page triggered the fetch.
#[derive(Clone, Default)]
pub struct SegmentCtx {
  pub params: BTreeMap<String, String>,
  /// Trailing access token from the request path, when the segment is
  /// dynamically keyed.
  pub token: Option<String>,
}

pub type SegmentRenderFn =
  Arc<dyn Fn(SegmentCtx) -> BoxFuture<Result<serde_json::Value, PleatError>> + Send + Sync>;

/// Request context for the non-prefetch (standard page) path.
#[derive(Clone, Default)]
pub struct PageCtx {
  pub path: String,
  pub params: BTreeMap<String, String>,
}

pub type PageFallbackFn =
  Arc<dyn Fn(PageCtx) -> BoxFuture<Result<String, PleatError>> + Send + Sync>;

/// One segment of a route's static structure.
pub struct SegmentDef {
  pub kind: SegmentKind,
  /// Slot name -> child segment. Child keys must be unique across the slots
  /// of one parent; resolution matches path components against child keys.
  pub slots: BTreeMap<String, SegmentDef>,
  /// Render closure producing the segment's prefetch content. `None` means
  /// the segment has no prefetch data and cannot be fetched individually.
  pub render: Option<SegmentRenderFn>,
}

impl SegmentDef {
  pub fn new(kind: SegmentKind) -> Self {
    Self { kind, slots: BTreeMap::new(), render: None }
  }

  pub fn slot(mut self, name: impl Into<String>, child: SegmentDef) -> Self {
    self.slots.insert(name.into(), child);
    self
  }

  pub fn render(mut self, f: SegmentRenderFn) -> Self {
    self.render = Some(f);
    self
  }

  /// Render closure that returns a fixed, prerendered value.
  pub fn render_value(mut self, value: serde_json::Value) -> Self {
    self.render = Some(Arc::new(move |_ctx| {
      let value = value.clone();
      Box::pin(async move { Ok(value) })
    }));
    self
  }
}

pub struct RouteDef {
  /// Axum route syntax, e.g. "/{lang}"
  pub pattern: String,
  pub root: SegmentDef,
}
