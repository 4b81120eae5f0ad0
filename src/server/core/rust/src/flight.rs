/* src/server/core/rust/src/flight.rs */

use std::convert::Infallible;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;

pub type BoxBodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, Infallible>> + Send>>;

/// A response in the line-oriented `<id>:<payload>` record format.
///
/// Record 0 is the root record; consumers locate it by the `0:` prefix.
/// Payloads are serialized compactly, one record per line. Constructed
/// fresh per request, streamed to completion, discarded.
#[derive(Debug)]
pub struct FlightStream {
  records: Vec<(u32, serde_json::Value)>,
}

impl FlightStream {
  pub fn new() -> Self {
    Self { records: Vec::new() }
  }

  /// A stream whose root record is `payload`.
  pub fn root(payload: serde_json::Value) -> Self {
    Self { records: vec![(0, payload)] }
  }

  /// Append a record, returning its id.
  pub fn append(&mut self, payload: serde_json::Value) -> u32 {
    let id = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
    self.records.push((id, payload));
    id
  }

  /// Encode all records as newline-terminated `<id>:<payload>` lines.
  pub fn encode(&self) -> String {
    let mut out = String::new();
    for (id, payload) in &self.records {
      out.push_str(&format!("{id}:{payload}\n"));
    }
    out
  }

  /// One body chunk per record. Dropping the stream mid-transfer stops
  /// production of further records; nothing needs rolling back.
  pub fn into_body(self) -> BoxBodyStream {
    Box::pin(futures_util::stream::iter(
      self
        .records
        .into_iter()
        .map(|(id, payload)| Ok(Bytes::from(format!("{id}:{payload}\n")))),
    ))
  }
}

impl Default for FlightStream {
  fn default() -> Self {
    Self::new()
  }
}
