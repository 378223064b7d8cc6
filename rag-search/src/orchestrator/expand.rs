//! Neighbour-aware collection expansion.
//!
//! When a requested collection is one chunk of a sequential document, the
//! chunks immediately before and after it are searched too so answers that
//! straddle a chunk boundary keep their context.

use std::collections::BTreeSet;

use crate::collection::CollectionId;

/// Compute the set of collections to query for a request.
///
/// With `neighbor_aware` off the identifiers are only deduplicated. With it
/// on, every identifier of the form `{mode}-{n}__{base}` also contributes
/// `{mode}-{n+1}__{base}` and, when `n > 1`, `{mode}-{n-1}__{base}`.
/// Identifiers that do not match are kept as they are. The result always
/// contains every input identifier verbatim.
pub fn expand_collections<I, S>(
    mode: &str,
    identifiers: I,
    neighbor_aware: bool,
) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = BTreeSet::new();
    for identifier in identifiers {
        let raw = identifier.as_ref();
        if neighbor_aware {
            if let CollectionId::Chunked(chunked) = CollectionId::parse(mode, raw) {
                expanded.extend(chunked.neighbors().map(|n| n.to_string()));
            }
        }
        expanded.insert(raw.to_owned());
    }
    expanded
}
