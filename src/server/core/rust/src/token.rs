/* src/server/core/rust/src/token.rs */

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

/// Access tokens are 8 lowercase hex chars, like build hashes.
pub const TOKEN_LEN: usize = 8;

static TOKEN_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new("^[0-9a-f]{8}$").expect("token pattern"));

/// Derive the access token a parent emits for one of its slot children.
///
/// Pure function of the static tree position (parent path, slot name, child
/// key), so a segment shared between pages emits the same token everywhere.
/// Tokens are scoped to the exact parent path; nothing beyond that is
/// promised, and they are not stable across route-definition changes.
pub fn access_token(parent_key: &str, slot: &str, child_key: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(parent_key.as_bytes());
  hasher.update(b"\0");
  hasher.update(slot.as_bytes());
  hasher.update(b"\0");
  hasher.update(child_key.as_bytes());
  let digest = format!("{:x}", hasher.finalize());
  digest[..TOKEN_LEN].to_string()
}

/// Check the token shape without interpreting the value.
pub fn is_token_shape(candidate: &str) -> bool {
  TOKEN_SHAPE.is_match(candidate)
}
