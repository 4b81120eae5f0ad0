/* src/server/core/rust/src/build_loader/loader.rs */

use std::path::Path;

use crate::route::{RouteDef, SegmentDef, SegmentKind};

use super::types::{SegmentEntry, SegmentManifest};

/// Parse an encoded segment key: `/`, `$param`, `_page` or a literal name.
pub(super) fn parse_segment_kind(raw: &str) -> SegmentKind {
  match raw {
    "/" => SegmentKind::Root,
    "_page" => SegmentKind::Page,
    _ => match raw.strip_prefix('$') {
      Some(param) => SegmentKind::Dynamic(param.to_string()),
      None => SegmentKind::Static(raw.to_string()),
    },
  }
}

fn build_segment(
  base: &Path,
  entry: &SegmentEntry,
) -> Result<SegmentDef, Box<dyn std::error::Error>> {
  let mut def = SegmentDef::new(parse_segment_kind(&entry.segment));
  if let Some(ref rel) = entry.content {
    let content = std::fs::read_to_string(base.join(rel))?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    def = def.render_value(value);
  }
  for (slot, child) in &entry.slots {
    def = def.slot(slot.clone(), build_segment(base, child)?);
  }
  Ok(def)
}

/// Load route definitions from pleat build output on disk.
/// Reads segment-manifest.json, loads prerendered content files,
/// constructs RouteDef trees.
pub fn load_build_output(dir: &str) -> Result<Vec<RouteDef>, Box<dyn std::error::Error>> {
  let base = Path::new(dir);
  let manifest_path = base.join("segment-manifest.json");
  let content = std::fs::read_to_string(&manifest_path)?;
  let manifest: SegmentManifest = serde_json::from_str(&content)?;

  let mut routes = Vec::new();
  for (pattern, entry) in &manifest.routes {
    routes.push(RouteDef { pattern: pattern.clone(), root: build_segment(base, entry)? });
  }
  Ok(routes)
}
