use std::collections::HashMap;
use tokio::sync::Mutex;

/// Last rendered markup per vehicle key. The key set is fixed at
/// construction; `set` never inserts and `reset` never removes, so readers
/// always see the configured keys and nothing else.
pub struct XmlCache {
    entries: Mutex<HashMap<String, Option<String>>>,
}

impl XmlCache {
    pub fn new<I>(keys: I) -> XmlCache
    where
        I: IntoIterator<Item = String>,
    {
        XmlCache {
            entries: Mutex::new(keys.into_iter().map(|key| (key, None)).collect()),
        }
    }

    /// Clears every entry, keeping the key set intact.
    pub async fn reset(&self) {
        for entry in self.entries.lock().await.values_mut() {
            *entry = None;
        }
    }

    /// Overwrites one key's entry. Unknown keys are ignored.
    pub async fn set(&self, key: &str, markup: Option<String>) {
        if let Some(entry) = self.entries.lock().await.get_mut(key) {
            *entry = markup;
        }
    }

    /// Returns the cached markup, or `None` for an empty entry or a key that
    /// was never configured. Callers cannot tell the two apart.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<String> {
        vec!["bus_1".to_string(), "bus_2".to_string()]
    }

    #[tokio::test]
    async fn starts_with_every_key_absent() {
        let cache = XmlCache::new(keys());
        assert_eq!(cache.get("bus_1").await, None);
        assert_eq!(cache.get("bus_2").await, None);
    }

    #[tokio::test]
    async fn set_then_get_returns_markup() {
        let cache = XmlCache::new(keys());
        cache.set("bus_1", Some("<Response/>".to_string())).await;
        assert_eq!(cache.get("bus_1").await, Some("<Response/>".to_string()));
        assert_eq!(cache.get("bus_2").await, None);
    }

    #[tokio::test]
    async fn set_with_none_clears_one_entry() {
        let cache = XmlCache::new(keys());
        cache.set("bus_1", Some("<Response/>".to_string())).await;
        cache.set("bus_1", None).await;
        assert_eq!(cache.get("bus_1").await, None);
    }

    #[tokio::test]
    async fn reset_clears_all_entries() {
        let cache = XmlCache::new(keys());
        cache.set("bus_1", Some("<Response/>".to_string())).await;
        cache.set("bus_2", Some("<Response/>".to_string())).await;
        cache.reset().await;
        assert_eq!(cache.get("bus_1").await, None);
        assert_eq!(cache.get("bus_2").await, None);
    }

    #[tokio::test]
    async fn set_ignores_unconfigured_keys() {
        let cache = XmlCache::new(keys());
        cache.set("bus_9", Some("<Response/>".to_string())).await;
        assert_eq!(cache.get("bus_9").await, None);
    }
}
