//! # Common Types

/// The integer type of vocabulary ids.
///
/// Ids are dense, start at 0, and are never reused within a vocabulary.
pub type TokenId = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type PTHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> PTHashMap<K, V> {
            PTHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PTHashMap<K, V> {
            PTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type PTHashSet<V> = ahash::AHashSet<V>;

        /// Type Alias for the hasher state behind [`PTHashMap`].
        pub type PTBuildHasher = ahash::RandomState;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type PTHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> PTHashMap<K, V> {
            PTHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PTHashMap<K, V> {
            PTHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type PTHashSet<V> = std::collections::HashSet<V>;

        /// Type Alias for the hasher state behind [`PTHashMap`].
        pub type PTBuildHasher = std::collections::hash_map::RandomState;
    }
}

/// Static check that a value is `Send`.
pub fn check_is_send<S: Send>(_: &S) {}

/// Static check that a value is `Sync`.
pub fn check_is_sync<S: Sync>(_: &S) {}
