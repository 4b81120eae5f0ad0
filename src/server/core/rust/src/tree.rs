/* src/server/core/rust/src/tree.rs */

use std::collections::BTreeMap;

use serde::Serialize;

use crate::route::{RouteDef, SegmentDef, SegmentKind};

/// One node of the static route tree.
///
/// Value-typed and compared structurally: two pages that share a subtree get
/// equal nodes for it, which is how clients recognize already-fetched
/// segments. `key` is the full segment path from the root and is stable for
/// a given route definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteTree {
  pub key: String,
  /// Whether the segment can be fetched individually.
  pub prefetch: bool,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub slots: BTreeMap<String, RouteTree>,
}

/// Compute the static route tree for a route definition. Independent of any
/// request's dynamic data: dynamic segments appear under their placeholder
/// key (`$param`), never a concrete value.
pub fn build_route_tree(route: &RouteDef) -> RouteTree {
  node(&route.root, None)
}

fn node(def: &SegmentDef, parent_key: Option<&str>) -> RouteTree {
  let key = match &def.kind {
    SegmentKind::Root => "/".to_string(),
    kind => match parent_key {
      Some(parent) if parent != "/" => format!("{parent}.{}", kind.encode()),
      _ => kind.encode(),
    },
  };
  let slots = def
    .slots
    .iter()
    .map(|(slot, child)| (slot.clone(), node(child, Some(&key))))
    .collect();
  RouteTree { key, prefetch: def.render.is_some(), slots }
}

/// Root payload of a tree-mode response.
pub fn tree_record(route: &RouteDef) -> serde_json::Value {
  serde_json::json!({ "tree": build_route_tree(route) })
}
