/* demos/standalone/server-rust/src/routes.rs */

use std::sync::Arc;

use pleat_server::errors::PleatError;
use pleat_server::route::{
  BoxFuture, PageFallbackFn, RouteDef, SegmentCtx, SegmentDef, SegmentKind,
};
use serde_json::json;

/// Locale pages under one pattern: a shared root layout, a dynamically
/// keyed locale segment with a page leaf and a static docs sidebar.
pub fn app_routes() -> Vec<RouteDef> {
  let page =
    SegmentDef::new(SegmentKind::Page).render_value(json!({"type": "main", "children": ["welcome"]}));
  let docs = SegmentDef::new(SegmentKind::Static("docs".into()))
    .render_value(json!({"type": "aside", "children": ["docs"]}));
  let locale = SegmentDef::new(SegmentKind::Dynamic("lang".into()))
    .render(Arc::new(greet_locale))
    .slot("children", page)
    .slot("sidebar", docs);
  let root = SegmentDef::new(SegmentKind::Root)
    .render_value(json!({"type": "html", "children": ["layout"]}))
    .slot("children", locale);
  vec![RouteDef { pattern: "/{lang}".into(), root }]
}

fn greet_locale(ctx: SegmentCtx) -> BoxFuture<Result<serde_json::Value, PleatError>> {
  Box::pin(async move {
    let lang = ctx.params.get("lang").cloned().unwrap_or_default();
    let greeting = match lang.as_str() {
      "fr" => "bonjour",
      _ => "hello",
    };
    Ok(json!({"type": "section", "lang": lang, "children": [greeting]}))
  })
}

pub fn page_fallback() -> PageFallbackFn {
  Arc::new(|ctx| {
    Box::pin(async move {
      Ok(format!(
        "<!DOCTYPE html><html><body><h1>pleat demo</h1><p>{}</p></body></html>",
        ctx.path
      ))
    })
  })
}
