//! Content-addressing (§4.G): a fingerprint is the SHA-256 hex digest of a
//! value's canonical form with the auto-tabular transform forced off, so
//! the same logical value always hashes the same way regardless of which
//! [`CanonOpts`] a caller happens to be using for display.

use sha2::{Digest, Sha256};

use crate::canon::canonicalize_no_tabular;
use crate::value::Value;

/// 64 lowercase hex characters: `SHA256(canonicalize_no_tabular(value))`.
#[must_use]
pub fn fingerprint(value: &Value) -> String {
    let text = canonicalize_no_tabular(value);
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(digest)
}

/// Whether `a` and `b` are the same value: their table-free canonical
/// forms are equal as strings. `Struct` and `Map` are never `equal()`,
/// even with the same fields, because `type_name` is part of identity.
#[must_use]
pub fn equal(a: &Value, b: &Value) -> bool {
    canonicalize_no_tabular(a) == canonicalize_no_tabular(b)
}
