//! Renderer configuration.

use crate::buffer::DEFAULT_CAPACITY;

/// Immutable configuration shared by every render call of a [`crate::Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RenderConfig {
    /// Scratch buffer capacity in bytes, terminator included.
    pub capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl RenderConfig {
    /// Configuration whose buffer grows without a practical limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            capacity: usize::MAX,
        }
    }

    /// Returns a copy with a different capacity.
    #[must_use]
    pub const fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity }
    }

    /// Maximum number of text bytes a rendered instruction may occupy.
    #[must_use]
    pub const fn max_text_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderConfig;
    use crate::buffer::DEFAULT_CAPACITY;

    #[test]
    fn default_matches_scratch_size() {
        let config = RenderConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.max_text_len(), 31);
    }

    #[test]
    fn unbounded_and_override() {
        assert_eq!(RenderConfig::unbounded().capacity, usize::MAX);
        assert_eq!(RenderConfig::default().with_capacity(8).max_text_len(), 7);
        assert_eq!(RenderConfig::default().with_capacity(0).max_text_len(), 0);
    }
}
