use crate::count::Count;
use serde::{Deserialize, Serialize};

/// The glyph the counter renders in.
pub const GLYPH: &str = "🐳";

/// The whale counter widget model: one count, one way to move it. The hosting
/// app decides where it lives and when it's dropped; nothing here persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// How many whales we're showing.
    count: Count,
}

impl Counter {
    /// Start counting from wherever the host says.
    pub fn new(count: Count) -> Self {
        Self { count }
    }

    /// The current count.
    pub fn count(&self) -> Count {
        self.count
    }

    /// The one interaction: one more whale.
    pub fn increment(&mut self) {
        self.count = self.count.next();
    }

    /// Render the countable part of the widget: exactly `count` copies of the
    /// glyph, nothing between them. A pure function of the current state.
    pub fn glyphs(&self) -> String {
        (0..self.count.0).map(|_| GLYPH).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::proptest;

    #[test]
    fn renders_nothing_at_zero() {
        assert_eq!(Counter::default().glyphs(), "");
    }

    #[test]
    fn one_increment_one_whale() {
        let mut counter = Counter::default();

        counter.increment();

        assert_eq!(counter.glyphs(), "🐳");
    }

    #[test]
    fn three_whales_plus_two_increments_is_five() {
        let mut counter = Counter::new(Count(3));
        assert_eq!(counter.glyphs(), "🐳🐳🐳");

        counter.increment();
        counter.increment();

        assert_eq!(counter.count(), Count(5));
        assert_eq!(counter.glyphs(), "🐳🐳🐳🐳🐳");
    }

    proptest! {
        #[test]
        fn renders_exactly_count_glyphs(count in 0..2048u32) {
            let counter = Counter::new(Count(count));
            let glyphs = counter.glyphs();

            assert_eq!(glyphs.matches(GLYPH).count(), count as usize);
            assert_eq!(glyphs.chars().count(), count as usize);
        }

        #[test]
        fn rendering_is_idempotent(count in 0..2048u32) {
            let counter = Counter::new(Count(count));

            assert_eq!(counter.glyphs(), counter.glyphs());
            assert_eq!(counter.count(), Count(count));
        }

        #[test]
        fn incrementing_k_times_adds_k(start in 0..1024u32, k in 0..64u32) {
            let mut counter = Counter::new(Count(start));

            for _ in 0..k {
                counter.increment();
            }

            assert_eq!(counter.count(), Count(start + k));
        }
    }
}
