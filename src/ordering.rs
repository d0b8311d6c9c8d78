//! Ordering-index computation for series and image partitions.
//!
//! Every insert positions itself at (max existing index in scope + 1). The
//! computation is a pure function of the partition's existing indices so it
//! can be tested without a live store. Deletions and reassignments leave gaps
//! behind; siblings are never renumbered.

/// Next order index for a partition given its existing indices.
///
/// An empty partition yields 0. Concurrent callers can observe the same max
/// and produce a tie; ties are an accepted state, resolved by insertion order
/// or id when a consumer needs stable ordering.
pub fn next_order_index<I>(existing: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    existing.into_iter().max().map_or(0, |max| max + 1)
}
