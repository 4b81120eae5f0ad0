/* src/server/adapter/axum/src/handler/prefetch.rs */

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{MatchedPath, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use pleat_server::route::PageCtx;
use pleat_server::segment::{Resolution, SegmentPath, TREE_MARKER};
use pleat_server::{FlightStream, PleatError, render_segment, tree_record};

use super::AppState;
use crate::error::AxumError;

/// Marker headers of the segment-prefetch protocol.
pub(crate) const RSC_HEADER: &str = "rsc";
pub(crate) const PREFETCH_HEADER: &str = "pleat-router-prefetch";
pub(crate) const SEGMENT_HEADER: &str = "pleat-segment-prefetch";

const FLIGHT_CONTENT_TYPE: &str = "text/x-component";
/// Responses differ per marker set, so HTTP caches must key on all three.
const VARY_VALUE: &str = "rsc, pleat-router-prefetch, pleat-segment-prefetch";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  headers.get(name).and_then(|v| v.to_str().ok())
}

fn is_segment_prefetch(headers: &HeaderMap) -> bool {
  header_value(headers, RSC_HEADER) == Some("1")
    && header_value(headers, PREFETCH_HEADER) == Some("1")
    && headers.contains_key(SEGMENT_HEADER)
}

fn flight_response(stream: FlightStream) -> Response {
  (
    StatusCode::OK,
    [(header::CONTENT_TYPE, FLIGHT_CONTENT_TYPE), (header::VARY, VARY_VALUE)],
    axum::body::Body::from_stream(stream.into_body()),
  )
    .into_response()
}

/// 404 with an exactly-empty body: no Flight record, no diagnostics.
fn empty_not_found() -> Response {
  (StatusCode::NOT_FOUND, [(header::VARY, VARY_VALUE)], axum::body::Body::empty()).into_response()
}

pub(super) async fn handle_prefetch(
  State(state): State<Arc<AppState>>,
  matched: MatchedPath,
  uri: axum::http::Uri,
  headers: HeaderMap,
  Path(params): Path<HashMap<String, String>>,
) -> Result<Response, AxumError> {
  let route_pattern = matched.as_str().to_string();
  let route = state
    .routes
    .get(&route_pattern)
    .ok_or_else(|| PleatError::not_found("Route not found"))?;

  if !is_segment_prefetch(&headers) {
    return page_fallback(&state, &uri, params).await;
  }
  let marker = header_value(&headers, SEGMENT_HEADER).unwrap_or_default();

  if marker == TREE_MARKER {
    tracing::debug!(route = %route_pattern, "tree prefetch");
    return Ok(flight_response(FlightStream::root(tree_record(route))));
  }

  let Some(path) = SegmentPath::parse(marker) else {
    return Ok(empty_not_found());
  };
  match pleat_server::resolve(&route.root, &path) {
    Resolution::Resolved(resolved) => {
      tracing::debug!(route = %route_pattern, segment = %resolved.key, "segment prefetch");
      let params: BTreeMap<String, String> = params.into_iter().collect();
      let stream = render_segment(&resolved, &params).await.map_err(|e| {
        tracing::warn!(route = %route_pattern, segment = %resolved.key, error = %e, "segment render failed");
        e
      })?;
      Ok(flight_response(stream))
    }
    Resolution::NotFound => Ok(empty_not_found()),
  }
}

async fn page_fallback(
  state: &AppState,
  uri: &axum::http::Uri,
  params: HashMap<String, String>,
) -> Result<Response, AxumError> {
  let Some(ref fallback) = state.page_fallback else {
    return Ok(StatusCode::NOT_FOUND.into_response());
  };
  let ctx = PageCtx { path: uri.path().to_string(), params: params.into_iter().collect() };
  let html = fallback(ctx).await?;
  Ok(Html(html).into_response())
}
