//! dense-hashmap: a single-threaded hash map that stores entries densely and
//! indexes them with a Robin Hood open-addressing slot array.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: cache-friendly storage with bounded worst-case probe length and
//!   tombstone-free deletion, built in small, independently testable layers.
//! - Layers:
//!   - WyHasher (`hash`): streaming multiplicative mixer producing the
//!     64-bit digest for a key's byte representation; digests are computed
//!     once per key and cached with the entry.
//!   - DenseStore (`dense_store`): gap-free vector of composite
//!     (key, value, digest) entries addressed by dense position; removal is
//!     swap-with-tail so positions stay contiguous.
//!   - BucketIndex (`bucket_index`): power-of-two slot array mapping digests
//!     to dense positions with Robin Hood linear probing; deletion repairs
//!     the probe run by backward shifting instead of writing tombstones.
//!   - DenseHashMap (`map`): public API composing the three; owns the 80%
//!     load-factor policy and triggers index rebuilds on growth.
//!
//! Constraints
//! - Single-threaded: one owner issues operations sequentially; exclusive
//!   borrows make references returned by lookups and mutations impossible to
//!   hold across relocating calls.
//! - Keys and values are plain copyable data (`Copy + Eq + Hash` keys,
//!   `Copy` values); equality is structural, never byte comparison.
//! - Growth paths surface allocation failure as a recoverable error and
//!   leave the map in its prior valid state.
//! - The occupied index slots always form a bijection onto the live dense
//!   positions; after any put, `len() <= bucket_count() * 4 / 5`.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its precomputed `u64` digest and the index always
//!   probes on stored digests; `K: Hash` runs exactly once per put and once
//!   per lookup, never during growth or repair.
//!
//! Notes and non-goals
//! - No concurrent access of any kind; serialize externally if shared.
//! - No persistence or serialization of map contents.
//! - Iteration follows dense storage order, which removal reshuffles; order
//!   is not stable across deletions.
//! - Variable-length keys are not stored; use a fixed-width key type whose
//!   `Hash`/`Eq` carry the intended semantics (`&str` compares content, an
//!   interned id compares identity).

mod bucket_index;
mod dense_store;
pub mod hash;
mod map;
mod map_proptest;

// Public surface
pub use dense_store::CapacityError;
pub use hash::{DefaultHashBuilder, F32Key, F64Key, WyHasher};
pub use map::{DenseHashMap, Iter, IterMut};
