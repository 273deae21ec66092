use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and capacity knobs for one highlight session.
///
/// The defaults are the reference behavior; embedders tune them at session
/// construction, nothing is hardwired past this point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long an auto-hiding highlight stays up.
    pub show_duration_ms: u64,
    /// Rate-limit window for click-driven source resolution; the leading
    /// edge of a burst is suppressed.
    pub click_throttle_ms: u64,
    /// Settling window for file/line lookups from the IDE side.
    pub source_debounce_ms: u64,
    /// Capacity of the bridge and event channels.
    pub channel_capacity: usize,
}

impl SessionConfig {
    pub fn show_duration(&self) -> Duration {
        Duration::from_millis(self.show_duration_ms)
    }

    pub fn click_throttle(&self) -> Duration {
        Duration::from_millis(self.click_throttle_ms)
    }

    pub fn source_debounce(&self) -> Duration {
        Duration::from_millis(self.source_debounce_ms)
    }

    pub fn with_show_duration(mut self, value: Duration) -> Self {
        self.show_duration_ms = value.as_millis() as u64;
        self
    }

    pub fn with_click_throttle(mut self, value: Duration) -> Self {
        self.click_throttle_ms = value.as_millis() as u64;
        self
    }

    pub fn with_source_debounce(mut self, value: Duration) -> Self {
        self.source_debounce_ms = value.as_millis() as u64;
        self
    }

    pub fn with_channel_capacity(mut self, value: usize) -> Self {
        self.channel_capacity = value;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            show_duration_ms: 2000,
            click_throttle_ms: 200,
            source_debounce_ms: 250,
            channel_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_behavior() {
        let config = SessionConfig::default();
        assert_eq!(config.show_duration(), Duration::from_millis(2000));
        assert_eq!(config.click_throttle(), Duration::from_millis(200));
        assert_eq!(config.source_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn builders_replace_single_fields() {
        let config = SessionConfig::default()
            .with_show_duration(Duration::from_millis(500))
            .with_channel_capacity(8);
        assert_eq!(config.show_duration_ms, 500);
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.click_throttle_ms, 200);
    }
}
