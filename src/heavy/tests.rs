//! Heavy Store Tests
//!
//! Validates key validation and last-write-wins semantics of the
//! heavy-payload store.

#[cfg(test)]
mod tests {
    use crate::dispatch::types::DispatchError;
    use crate::heavy::store::HeavyStore;

    #[test]
    fn test_put_and_get() {
        let mut store = HeavyStore::new();
        store.put("k1", "blob1".to_string()).unwrap();

        assert_eq!(store.get("k1"), Some("blob1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_key_is_rejected_without_state_change() {
        let mut store = HeavyStore::new();

        let err = store.put("", "blob".to_string()).unwrap_err();
        assert_eq!(err, DispatchError::EmptyHeavyKey);
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins_on_key_collision() {
        let mut store = HeavyStore::new();
        store.put("k1", "first".to_string()).unwrap();
        store.put("k1", "second".to_string()).unwrap();

        assert_eq!(store.get("k1"), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_key_is_a_normal_outcome() {
        let store = HeavyStore::new();
        assert_eq!(store.get("nope"), None);
    }
}
