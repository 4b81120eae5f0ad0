/* src/server/core/rust/src/render.rs */

use std::collections::BTreeMap;

use crate::errors::PleatError;
use crate::flight::FlightStream;
use crate::route::{SegmentCtx, SegmentKind};
use crate::segment::ResolvedSegment;
use crate::token::access_token;

/// Render one resolved segment into a Flight stream.
///
/// The root record carries the rendered content under `rsc` and, when the
/// segment has slot children, a `slots` map naming the access token for
/// each dynamically keyed child (statically addressable children map to the
/// empty string; their tree key is enough to fetch them).
///
/// Output is a pure function of (segment location, token, scoped params):
/// two pages that share a segment produce byte-identical streams for it.
pub async fn render_segment(
  resolved: &ResolvedSegment<'_>,
  params: &BTreeMap<String, String>,
) -> Result<FlightStream, PleatError> {
  let target = resolved.chain[resolved.chain.len() - 1];
  let render = target
    .render
    .as_ref()
    .ok_or_else(|| PleatError::internal("resolved segment has no render closure"))?;

  let ctx = SegmentCtx { params: scoped_params(resolved, params), token: resolved.token.clone() };
  let content = render(ctx).await?;

  let mut payload = serde_json::Map::new();
  payload.insert("rsc".to_string(), content);
  if !target.slots.is_empty() {
    let mut slots = serde_json::Map::new();
    for (slot, child) in &target.slots {
      let value = if child.kind.is_dynamic() {
        access_token(&resolved.key, slot, &child.kind.encode())
      } else {
        String::new()
      };
      slots.insert(slot.clone(), serde_json::Value::String(value));
    }
    payload.insert("slots".to_string(), serde_json::Value::Object(slots));
  }
  Ok(FlightStream::root(serde_json::Value::Object(payload)))
}

/// Params bound on the segment's own path prefix only. An ancestor never
/// sees a descendant's params.
fn scoped_params(
  resolved: &ResolvedSegment<'_>,
  params: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
  let mut scoped = BTreeMap::new();
  for def in &resolved.chain {
    if let SegmentKind::Dynamic(param) = &def.kind {
      if let Some(value) = params.get(param) {
        scoped.insert(param.clone(), value.clone());
      }
    }
  }
  scoped
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::route::{SegmentDef, SegmentKind};
  use crate::segment::{Resolution, SegmentPath, resolve};

  fn app_root() -> SegmentDef {
    let page = SegmentDef::new(SegmentKind::Page)
      .render_value(serde_json::json!({"type": "p", "children": "welcome"}));
    let lang = SegmentDef::new(SegmentKind::Dynamic("lang".into()))
      .render(Arc::new(|ctx| {
        Box::pin(async move {
          let lang = ctx.params.get("lang").cloned().unwrap_or_default();
          Ok(serde_json::json!({"type": "section", "lang": lang}))
        })
      }))
      .slot("children", page);
    SegmentDef::new(SegmentKind::Root)
      .render_value(serde_json::json!({"type": "html"}))
      .slot("children", lang)
  }

  fn params(lang: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("lang".to_string(), lang.to_string());
    map
  }

  async fn render(root: &SegmentDef, path: &str, lang: &str) -> String {
    let path = SegmentPath::parse(path).expect("path");
    let Resolution::Resolved(seg) = resolve(root, &path) else {
      panic!("path should resolve");
    };
    render_segment(&seg, &params(lang)).await.expect("render").encode()
  }

  #[tokio::test]
  async fn shared_segment_is_byte_identical_across_params() {
    let root = app_root();
    // The root segment never sees the lang param, so both pages get the
    // same bytes.
    assert_eq!(render(&root, "/", "en").await, render(&root, "/", "fr").await);
  }

  #[tokio::test]
  async fn root_payload_exposes_child_tokens() {
    let root = app_root();
    let body = render(&root, "/", "en").await;
    let record: serde_json::Value =
      serde_json::from_str(body.strip_prefix("0:").expect("root record").trim_end())
        .expect("json");
    let token = record["slots"]["children"].as_str().expect("token");
    assert_eq!(token, access_token("/", "children", "$lang"));
  }

  #[tokio::test]
  async fn dynamic_segment_sees_its_own_param() {
    let root = app_root();
    let token = access_token("/", "children", "$lang");
    let en = render(&root, &format!("$lang.{token}"), "en").await;
    let fr = render(&root, &format!("$lang.{token}"), "fr").await;
    assert!(en.contains("\"lang\":\"en\""));
    assert!(fr.contains("\"lang\":\"fr\""));
    assert_ne!(en, fr);
  }

  #[tokio::test]
  async fn static_child_maps_to_empty_token() {
    let root = app_root();
    let token = access_token("/", "children", "$lang");
    let body = render(&root, &format!("$lang.{token}"), "en").await;
    let record: serde_json::Value =
      serde_json::from_str(body.strip_prefix("0:").expect("root record").trim_end())
        .expect("json");
    assert_eq!(record["slots"]["children"], "");
  }

  #[tokio::test]
  async fn leaf_payload_has_no_slots_field() {
    let root = app_root();
    let body = render(&root, "$lang._page", "en").await;
    let record: serde_json::Value =
      serde_json::from_str(body.strip_prefix("0:").expect("root record").trim_end())
        .expect("json");
    assert!(record.get("rsc").is_some());
    assert!(record.get("slots").is_none());
  }

  #[tokio::test]
  async fn tree_key_and_parent_token_compose() {
    // The child key reported by the tree plus the token reported in the
    // parent's payload must resolve to that child.
    let root = app_root();
    let route = crate::route::RouteDef { pattern: "/{lang}".into(), root: app_root() };
    let tree = crate::tree::build_route_tree(&route);
    let child_key = tree.slots["children"].key.clone();

    let body = render(&root, "/", "en").await;
    let record: serde_json::Value =
      serde_json::from_str(body.strip_prefix("0:").expect("root record").trim_end())
        .expect("json");
    let token = record["slots"]["children"].as_str().expect("token");

    let path = SegmentPath::parse(&format!("{child_key}.{token}")).expect("path");
    match resolve(&root, &path) {
      Resolution::Resolved(seg) => assert_eq!(seg.key, child_key),
      Resolution::NotFound => panic!("tree key + token should resolve"),
    }
  }

  #[tokio::test]
  async fn render_fault_propagates_as_error() {
    let root = SegmentDef::new(SegmentKind::Root)
      .render(Arc::new(|_ctx| Box::pin(async { Err(PleatError::render("boom")) })));
    let path = SegmentPath::parse("/").expect("path");
    let Resolution::Resolved(seg) = resolve(&root, &path) else {
      panic!("root should resolve");
    };
    let err = render_segment(&seg, &BTreeMap::new()).await.expect_err("fault");
    assert_eq!(err.code(), "RENDER_ERROR");
  }
}
