//! Value classification: ordered threshold tables mapping a reading to a
//! category label and display color tier.
//!
//! Classification is pure and stateless — a category is re-derivable from the
//! current value alone, which is what makes it independently testable. Each
//! gauge authors its own table in [`crate::widgets`].
//!
//! # Table Shape
//!
//! A table is a list of tiers with strictly decreasing lower bounds plus a
//! fallback category. `classify` walks the tiers in order and returns the
//! first whose bound the value meets (`value >= min`); the fallback catches
//! everything below the last bound. Exhaustiveness is therefore guaranteed
//! by construction, and the monotonicity check at build time guarantees the
//! tiers partition the domain with no gap or overlap.

use crate::colors::ColorToken;
use crate::error::ConfigError;

// =============================================================================
// Category & Tiers
// =============================================================================

/// Label and color tier for one classified sub-range.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Category {
    pub label: &'static str,
    pub color: ColorToken,
}

impl Category {
    pub const fn new(
        label: &'static str,
        color: ColorToken,
    ) -> Self {
        Self { label, color }
    }
}

/// One tier: everything at or above `min` (and below the previous tier's
/// bound) classifies as `category`.
#[derive(Clone, Copy, Debug)]
pub struct Threshold {
    pub min: f64,
    pub category: Category,
}

impl Threshold {
    pub const fn new(
        min: f64,
        label: &'static str,
        color: ColorToken,
    ) -> Self {
        Self {
            min,
            category: Category::new(label, color),
        }
    }
}

// =============================================================================
// ThresholdTable
// =============================================================================

/// Ordered first-match-wins classification table.
#[derive(Clone, Debug)]
pub struct ThresholdTable {
    tiers: Vec<Threshold>,
    fallback: Category,
}

impl ThresholdTable {
    /// Build a table, rejecting empty tier lists and bounds that do not
    /// strictly decrease.
    pub fn new(
        tiers: Vec<Threshold>,
        fallback: Category,
    ) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::EmptyThresholdTable);
        }
        for pair in tiers.windows(2) {
            if pair[1].min >= pair[0].min {
                return Err(ConfigError::NonMonotonicThresholds {
                    prev: pair[0].min,
                    next: pair[1].min,
                });
            }
        }
        Ok(Self { tiers, fallback })
    }

    /// Classify a value: first tier whose bound it meets, else the fallback.
    pub fn classify(
        &self,
        value: f64,
    ) -> Category {
        for tier in &self.tiers {
            if value >= tier.min {
                return tier.category;
            }
        }
        self.fallback
    }

    /// The tiers in match order (highest bound first).
    pub fn tiers(&self) -> &[Threshold] {
        &self.tiers
    }

    /// The catch-all category below the lowest bound.
    pub const fn fallback(&self) -> Category {
        self.fallback
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Heart-rate table: domain [60, 120] bpm.
    fn heart_rate_table() -> ThresholdTable {
        ThresholdTable::new(
            vec![
                Threshold::new(100.0, "Elevated", ColorToken::Red),
                Threshold::new(85.0, "Active", ColorToken::Orange),
                Threshold::new(70.0, "Normal", ColorToken::Yellow),
            ],
            Category::new("Resting", ColorToken::Green),
        )
        .unwrap()
    }

    // -------------------------------------------------------------------------
    // Construction Validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_table_rejected() {
        let err = ThresholdTable::new(vec![], Category::new("Only", ColorToken::Green)).unwrap_err();
        assert_eq!(err, ConfigError::EmptyThresholdTable);
    }

    #[test]
    fn test_non_monotonic_bounds_rejected() {
        let err = ThresholdTable::new(
            vec![
                Threshold::new(50.0, "High", ColorToken::Red),
                Threshold::new(80.0, "Low", ColorToken::Green),
            ],
            Category::new("Floor", ColorToken::Blue),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonMonotonicThresholds { prev: 50.0, next: 80.0 },
            "Increasing bounds would make the second tier unreachable"
        );
    }

    #[test]
    fn test_equal_bounds_rejected() {
        let err = ThresholdTable::new(
            vec![
                Threshold::new(50.0, "A", ColorToken::Red),
                Threshold::new(50.0, "B", ColorToken::Green),
            ],
            Category::new("Floor", ColorToken::Blue),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonMonotonicThresholds { .. }));
    }

    // -------------------------------------------------------------------------
    // Classification Semantics
    // -------------------------------------------------------------------------

    #[test]
    fn test_heart_rate_tiers() {
        let table = heart_rate_table();
        assert_eq!(table.classify(115.0).label, "Elevated");
        assert_eq!(table.classify(87.0).label, "Active");
        assert_eq!(table.classify(87.0).color, ColorToken::Orange);
        assert_eq!(table.classify(82.0).label, "Normal", "82 bpm sits below the 85 Active bound");
        assert_eq!(table.classify(82.0).color, ColorToken::Yellow);
        assert_eq!(table.classify(62.0).label, "Resting");
    }

    #[test]
    fn test_boundary_values_match_inclusive_bound() {
        let table = heart_rate_table();
        assert_eq!(table.classify(100.0).label, "Elevated", "Bounds are inclusive");
        assert_eq!(table.classify(85.0).label, "Active");
        assert_eq!(table.classify(70.0).label, "Normal");
        assert_eq!(
            table.classify(69.999).label,
            "Resting",
            "Just below a bound falls to the next tier"
        );
    }

    #[test]
    fn test_values_outside_domain_still_classify() {
        // Classification is total over all reals, not just the metric domain;
        // out-of-domain values land in the nearest edge tier.
        let table = heart_rate_table();
        assert_eq!(table.classify(500.0).label, "Elevated");
        assert_eq!(table.classify(-40.0).label, "Resting");
    }

    // -------------------------------------------------------------------------
    // Totality Property
    // -------------------------------------------------------------------------

    proptest! {
        /// Every value in the domain matches exactly one tier: the category
        /// returned equals the unique half-open sub-range the value falls in.
        #[test]
        fn prop_classification_total_and_unique(value in 60.0f64..=120.0) {
            let table = heart_rate_table();
            let got = table.classify(value);

            // Count tiers whose half-open range [min, prev_min) contains the value.
            let mut matches = 0;
            let mut prev_min = f64::INFINITY;
            for tier in table.tiers() {
                if value >= tier.min && value < prev_min {
                    matches += 1;
                    prop_assert_eq!(got.label, tier.category.label);
                }
                prev_min = tier.min;
            }
            if value < prev_min {
                matches += 1;
                prop_assert_eq!(got.label, table.fallback().label);
            }
            prop_assert_eq!(matches, 1, "value {} must fall in exactly one tier", value);
        }
    }
}
