/* src/server/core/rust/src/segment.rs */

use std::sync::LazyLock;

use regex::Regex;

use crate::route::SegmentDef;
use crate::token::{access_token, is_token_shape};

/// Segment-prefetch marker value that selects tree mode.
pub const TREE_MARKER: &str = "/_tree";

static COMPONENT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\$?[A-Za-z0-9_-]+$").expect("component pattern"));

/// A parsed segment path: dot-delimited components, `/` for the tree root.
/// A leading slash is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPath {
  components: Vec<String>,
}

impl SegmentPath {
  /// Parse a raw marker value. Anything outside the path grammar yields
  /// `None`; callers treat that the same as an unresolvable path.
  pub fn parse(raw: &str) -> Option<SegmentPath> {
    if raw == "/" {
      return Some(SegmentPath { components: Vec::new() });
    }
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    if trimmed.is_empty() {
      return None;
    }
    let components: Vec<String> = trimmed.split('.').map(str::to_string).collect();
    if components.iter().any(|c| !COMPONENT.is_match(c)) {
      return None;
    }
    Some(SegmentPath { components })
  }

  pub fn is_root(&self) -> bool {
    self.components.is_empty()
  }

  pub fn components(&self) -> &[String] {
    &self.components
  }
}

/// Outcome of segment resolution. Not-found is an expected value, never an
/// error: unknown keys, missing prefetch data, and bad tokens all land here.
pub enum Resolution<'a> {
  Resolved(ResolvedSegment<'a>),
  NotFound,
}

pub struct ResolvedSegment<'a> {
  /// Segments from the root to the target, inclusive.
  pub chain: Vec<&'a SegmentDef>,
  /// Canonical full path of the target (`/` for the root).
  pub key: String,
  /// Trailing access token, present iff the target is dynamically keyed.
  pub token: Option<String>,
}

struct Walk<'a> {
  chain: Vec<&'a SegmentDef>,
  /// Canonical key at each chain depth.
  keys: Vec<String>,
  /// Slot entered to reach each chain entry (empty for the root).
  slots: Vec<String>,
}

fn descend<'a>(root: &'a SegmentDef, components: &[String]) -> Option<Walk<'a>> {
  let mut walk = Walk {
    chain: vec![root],
    keys: vec!["/".to_string()],
    slots: vec![String::new()],
  };
  let mut current = root;
  let mut key = "/".to_string();
  for component in components {
    let (slot, child) =
      current.slots.iter().find(|(_, child)| child.kind.encode() == *component)?;
    key = if key == "/" { component.clone() } else { format!("{key}.{component}") };
    walk.chain.push(child);
    walk.keys.push(key.clone());
    walk.slots.push(slot.clone());
    current = child;
  }
  Some(walk)
}

fn finish(walk: Walk<'_>, token: Option<String>) -> Resolution<'_> {
  let target = walk.chain[walk.chain.len() - 1];
  if target.render.is_none() {
    return Resolution::NotFound;
  }
  let key = walk.keys[walk.keys.len() - 1].clone();
  Resolution::Resolved(ResolvedSegment { chain: walk.chain, key, token })
}

/// Resolve a segment path against a route's segment structure.
///
/// Pure function of (tree shape, path). A full structural match is tried
/// first, so a static segment whose name happens to look like a token wins
/// over token interpretation. A dynamically keyed segment resolves only
/// when the path carries the access token its parent emits for it; a token
/// with the wrong shape or value fails closed.
pub fn resolve<'a>(root: &'a SegmentDef, path: &SegmentPath) -> Resolution<'a> {
  if path.is_root() {
    let Some(walk) = descend(root, &[]) else {
      return Resolution::NotFound;
    };
    return finish(walk, None);
  }

  let components = path.components();
  if let Some(walk) = descend(root, components) {
    // Token-free paths only address statically keyed segments.
    let target = walk.chain[walk.chain.len() - 1];
    if target.kind.is_dynamic() {
      return Resolution::NotFound;
    }
    return finish(walk, None);
  }

  let Some((candidate, prefix)) = components.split_last() else {
    return Resolution::NotFound;
  };
  if prefix.is_empty() || !is_token_shape(candidate) {
    return Resolution::NotFound;
  }
  let Some(walk) = descend(root, prefix) else {
    return Resolution::NotFound;
  };
  let depth = walk.chain.len() - 1;
  let target = walk.chain[depth];
  if !target.kind.is_dynamic() {
    return Resolution::NotFound;
  }
  let expected = access_token(&walk.keys[depth - 1], &walk.slots[depth], &target.kind.encode());
  if *candidate != expected {
    return Resolution::NotFound;
  }
  finish(walk, Some(candidate.clone()))
}
