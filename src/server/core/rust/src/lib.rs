/* src/server/core/rust/src/lib.rs */

pub mod build_loader;
pub mod errors;
pub mod flight;
pub mod render;
pub mod route;
pub mod segment;
pub mod server;
pub mod token;
pub mod tree;

// Re-exports for ergonomic use
pub use build_loader::load_build_output;
pub use errors::PleatError;
pub use flight::{BoxBodyStream, FlightStream};
pub use render::render_segment;
pub use route::{
  BoxFuture, PageCtx, PageFallbackFn, RouteDef, SegmentCtx, SegmentDef, SegmentKind,
  SegmentRenderFn,
};
pub use segment::{Resolution, ResolvedSegment, SegmentPath, TREE_MARKER, resolve};
pub use server::{PleatParts, PleatServer};
pub use token::{access_token, is_token_shape};
pub use tree::{RouteTree, build_route_tree, tree_record};
