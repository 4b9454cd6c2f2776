use std::time::Duration;

use praven_cache::{CacheKey, ResponseCache};
use proptest::prelude::*;

proptest! {
    /// Keyword insertion order never changes the key.
    #[test]
    fn keyword_order_is_irrelevant(
        kwargs in proptest::collection::btree_map("[a-z]{1,8}", -1000i64..1000, 0..6)
    ) {
        let forward = kwargs
            .iter()
            .fold(CacheKey::new("call"), |k, (name, v)| k.kwarg(name.clone(), *v));
        let backward = kwargs
            .iter()
            .rev()
            .fold(CacheKey::new("call"), |k, (name, v)| k.kwarg(name.clone(), *v));
        prop_assert_eq!(forward.digest(), backward.digest());
    }

    /// Distinct positional argument lists give distinct keys.
    #[test]
    fn positional_arguments_are_distinguished(a in -1000i64..1000, b in -1000i64..1000) {
        prop_assume!(a != b);
        let ab = CacheKey::new("call").arg(a).arg(b).digest();
        let ba = CacheKey::new("call").arg(b).arg(a).digest();
        prop_assert_ne!(ab, ba);
    }

    /// `set` followed immediately by `get` returns the stored value.
    #[test]
    fn set_get_round_trip(key in "[a-f0-9]{8}", value in any::<i64>()) {
        let cache = ResponseCache::new(Duration::from_secs(3600), 100);
        cache.set(&key, serde_json::json!(value));
        prop_assert_eq!(cache.get(&key), Some(serde_json::json!(value)));
    }
}
