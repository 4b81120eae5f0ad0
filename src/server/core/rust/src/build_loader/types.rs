/* src/server/core/rust/src/build_loader/types.rs */

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
pub(super) struct SegmentManifest {
  pub routes: BTreeMap<String, SegmentEntry>,
}

/// One segment in the manifest. `segment` is the encoded key (`/`, a
/// literal name, `$param` or `_page`); `content` points at the prerendered
/// JSON for the segment, relative to the build directory.
#[derive(Deserialize)]
pub(super) struct SegmentEntry {
  pub segment: String,
  #[serde(default)]
  pub content: Option<String>,
  #[serde(default)]
  pub slots: BTreeMap<String, SegmentEntry>,
}
