//! Category label to provider tag id resolution
//!
//! The provider indexes markets both by free-text category and by tag id.
//! The resolver maps a human category label to the tag id via one
//! exhaustive tag listing, memoized for the process lifetime. Negative
//! results are cached too so a label that matches nothing does not trigger
//! a full listing on every collection run. The cache is unbounded; the
//! label space is a handful of categories.

use crate::gateway::MarketGateway;
use crate::normalizer::normalize_label;
use parking_lot::RwLock;
use polypulse_core::PulseResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Label -> tag id resolver with a process-lifetime cache
pub struct TagResolver {
    gateway: Arc<dyn MarketGateway>,
    cache: RwLock<HashMap<String, Option<String>>>,
}

impl TagResolver {
    pub fn new(gateway: Arc<dyn MarketGateway>) -> Self {
        Self {
            gateway,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a category label to the provider's tag id.
    ///
    /// Ok(None) means the label matched no tag; that outcome is cached
    /// like a hit. Only a gateway failure is an error, and it leaves the
    /// cache untouched.
    pub async fn resolve(&self, label: &str) -> PulseResult<Option<String>> {
        let key = normalize_label(label);

        if let Some(cached) = self.cache.read().get(&key) {
            return Ok(cached.clone());
        }

        let tags = self.gateway.fetch_tags().await?;
        let resolved = tags
            .iter()
            .find(|tag| {
                tag.label
                    .as_deref()
                    .is_some_and(|l| normalize_label(l) == key)
                    || tag.slug.as_deref().is_some_and(|s| normalize_label(s) == key)
            })
            .and_then(|tag| tag.id.clone());

        debug!("Resolved label {:?} to tag {:?}", label, resolved);
        self.cache.write().insert(key, resolved.clone());

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockGateway;

    #[tokio::test]
    async fn test_resolves_by_label_or_slug() {
        let gateway = Arc::new(MockGateway::new().with_tags(vec![
            ("2", "Politics", "politics"),
            ("21", "Crypto", "crypto"),
        ]));
        let resolver = TagResolver::new(gateway);

        assert_eq!(resolver.resolve("Crypto").await.unwrap(), Some("21".into()));
        assert_eq!(
            resolver.resolve("  politics ").await.unwrap(),
            Some("2".into())
        );
    }

    #[tokio::test]
    async fn test_cache_hit_skips_tag_listing() {
        let gateway = Arc::new(MockGateway::new().with_tags(vec![("21", "Crypto", "crypto")]));
        let resolver = TagResolver::new(gateway.clone());

        assert_eq!(resolver.resolve("crypto").await.unwrap(), Some("21".into()));
        assert_eq!(resolver.resolve("CRYPTO").await.unwrap(), Some("21".into()));
        assert_eq!(gateway.tag_fetches(), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_cached_too() {
        let gateway = Arc::new(MockGateway::new().with_tags(vec![("21", "Crypto", "crypto")]));
        let resolver = TagResolver::new(gateway.clone());

        assert_eq!(resolver.resolve("esports").await.unwrap(), None);
        assert_eq!(resolver.resolve("esports").await.unwrap(), None);
        assert_eq!(gateway.tag_fetches(), 1);
    }
}
