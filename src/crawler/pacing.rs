//! Request pacing
//!
//! The crawl is strictly sequential and polite: a short pause follows every
//! extracted listing card and a longer one follows every search query.

use crate::config::SearchConfig;
use std::time::Duration;

/// Fixed delays applied between crawl steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    item_delay: Duration,
    query_delay: Duration,
}

impl Pacer {
    pub fn new(item_delay: Duration, query_delay: Duration) -> Self {
        Self {
            item_delay,
            query_delay,
        }
    }

    /// Builds a pacer from the search configuration
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            Duration::from_millis(config.item_delay_ms),
            Duration::from_millis(config.query_delay_ms),
        )
    }

    /// A pacer that never waits
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn item_delay(&self) -> Duration {
        self.item_delay
    }

    pub fn query_delay(&self) -> Duration {
        self.query_delay
    }

    /// Waits after one listing card (or one detail page)
    pub async fn after_item(&self) {
        pause(self.item_delay).await;
    }

    /// Waits after one search query
    pub async fn after_query(&self) {
        pause(self.query_delay).await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tracing::trace!("Pausing for {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_from_config() {
        let pacer = Pacer::from_config(&SearchConfig::default());
        assert_eq!(pacer.item_delay(), Duration::from_millis(500));
        assert_eq!(pacer.query_delay(), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_none_does_not_wait() {
        let start = Instant::now();
        let pacer = Pacer::none();
        pacer.after_item().await;
        pacer.after_query().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_configured_delays() {
        let pacer = Pacer::new(Duration::from_millis(500), Duration::from_millis(1000));
        let start = tokio::time::Instant::now();

        pacer.after_item().await;
        assert!(start.elapsed() >= Duration::from_millis(500));

        pacer.after_query().await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
