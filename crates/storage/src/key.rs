//! Object key construction and public-URL path extraction.

use uuid::Uuid;

/// Build a collision-free object key scoped under the owning user.
///
/// The random UUID component makes the key unique by construction, so
/// concurrent uploads of identically-named files never collide. The
/// user-id prefix scopes admin deletions to one account's objects.
pub fn object_key(user_id: Uuid, filename: &str) -> String {
    format!("{user_id}/{}-{filename}", Uuid::new_v4())
}

/// Derive an object's storage path from its public URL.
///
/// The public URL format is `{base}/{bucket}/{key}`; this strips the
/// bucket-specific prefix and returns the key. Returns `None` when the
/// URL does not point into the given bucket, which callers treat as
/// "object already absent" rather than an error.
pub fn extract_object_path(public_url: &str, base_url: &str, bucket: &str) -> Option<String> {
    let marker = format!("{}/{bucket}/", base_url.trim_end_matches('/'));
    let index = public_url.find(&marker)?;
    let path = &public_url[index + marker.len()..];
    if path.is_empty() {
        return None;
    }
    Some(path.to_string())
}
