//! # Thread Utilities

use std::thread;

/// Get the max parallelism available.
pub fn est_max_parallelism() -> usize {
    let default = || {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    };

    #[cfg(feature = "rayon")]
    {
        use core::str::FromStr;

        match std::env::var("RAYON_NUM_THREADS")
            .ok()
            .and_then(|s| usize::from_str(&s).ok())
        {
            Some(x @ 1..) => x,
            _ => default(),
        }
    }

    #[cfg(not(feature = "rayon"))]
    default()
}

/// The number of lock shards for a concurrent map.
///
/// A power of two, several per available thread, so that threads
/// touching distinct keys rarely share a lock.
pub fn default_shard_count() -> usize {
    (est_max_parallelism() * 4).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_count() {
        let shards = default_shard_count();
        assert!(shards >= 4);
        assert!(shards.is_power_of_two());
        assert!(est_max_parallelism() >= 1);
    }
}
