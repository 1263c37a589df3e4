//! Published benchmarks and input domains.
//!
//! Cycle times are in days. Touchless rates and payment yields are fractions
//! in `[0, 1]`; conversion to a percentage happens only at format time.

use serde::Serialize;

/// Average and best-in-class invoice cycle time, in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleTimeBenchmark {
    pub average: f64,
    pub best: f64,
}

/// Average and best-in-class share of PO invoices processed without a human touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouchlessBenchmark {
    pub average: f64,
    pub best: f64,
}

/// Range of annual payment savings as a fraction of payables spend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentYield {
    pub low: f64,
    pub high: f64,
}

pub const PO_CYCLE_TIME: CycleTimeBenchmark = CycleTimeBenchmark {
    average: 6.7,
    best: 2.6,
};

pub const NON_PO_CYCLE_TIME: CycleTimeBenchmark = CycleTimeBenchmark {
    average: 6.3,
    best: 1.0,
};

/// Touchless benchmarks apply to PO invoices only.
pub const TOUCHLESS_RATE: TouchlessBenchmark = TouchlessBenchmark {
    average: 0.667,
    best: 0.937,
};

/// 0.09975% to 0.1875% of annual payables spend.
pub const PAYMENT_YIELD: PaymentYield = PaymentYield {
    low: 0.000_997_5,
    high: 0.001_875,
};

/// The full benchmark set consumed by a savings calculator.
///
/// # Examples
///
/// ```
/// use roi_core::constants::Benchmarks;
/// let b = Benchmarks::default();
/// assert_eq!(b.po_cycle_time.average, 6.7);
/// assert_eq!(b.non_po_cycle_time.best, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    pub po_cycle_time: CycleTimeBenchmark,
    pub non_po_cycle_time: CycleTimeBenchmark,
    pub touchless_rate: TouchlessBenchmark,
    pub payment_yield: PaymentYield,
}

impl Default for Benchmarks {
    fn default() -> Self {
        PUBLISHED_BENCHMARKS
    }
}

pub const PUBLISHED_BENCHMARKS: Benchmarks = Benchmarks {
    po_cycle_time: PO_CYCLE_TIME,
    non_po_cycle_time: NON_PO_CYCLE_TIME,
    touchless_rate: TOUCHLESS_RATE,
    payment_yield: PAYMENT_YIELD,
};

// --- Input domains ---

/// Closed range, control step and default for an integer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntDomain {
    pub min: i64,
    pub max: i64,
    /// Step of the bounded UI control. Advisory; the store does not snap to it.
    pub step: i64,
    pub default: i64,
}

impl IntDomain {
    /// Clamp `raw` into `[min, max]`.
    pub fn clamp(&self, raw: i64) -> i64 {
        raw.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Closed range and resolution for a real-valued input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealDomain {
    pub min: f64,
    pub max: f64,
    /// Steps per unit. A value of 10 means 0.1 resolution.
    pub steps_per_unit: f64,
    pub default: f64,
}

impl RealDomain {
    /// Clamp `raw` into `[min, max]` and snap it to the domain resolution.
    ///
    /// Returns `None` for NaN or infinite input.
    ///
    /// # Examples
    ///
    /// ```
    /// use roi_core::constants::DAYS_TO_PROCESS;
    /// assert_eq!(DAYS_TO_PROCESS.clamp(0.5), Some(1.0));
    /// assert_eq!(DAYS_TO_PROCESS.clamp(7.34), Some(7.3));
    /// assert_eq!(DAYS_TO_PROCESS.clamp(f64::NAN), None);
    /// ```
    pub fn clamp(&self, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let bounded = raw.clamp(self.min, self.max);
        // Dividing by the integer scale keeps k/10 exact, multiplying by 0.1 does not.
        Some((bounded * self.steps_per_unit).round() / self.steps_per_unit)
    }
}

pub const PO_INVOICE_VOLUME: IntDomain = IntDomain {
    min: 0,
    max: 500_000,
    step: 5_000,
    default: 100_000,
};

pub const NON_PO_INVOICE_VOLUME: IntDomain = IntDomain {
    min: 0,
    max: 500_000,
    step: 5_000,
    default: 50_000,
};

pub const DAYS_TO_PROCESS: RealDomain = RealDomain {
    min: 1.0,
    max: 20.0,
    steps_per_unit: 10.0,
    default: 10.0,
};

/// Stored as an integer percentage, not a fraction.
pub const MANUAL_INTERVENTION_PCT: IntDomain = IntDomain {
    min: 0,
    max: 80,
    step: 1,
    default: 35,
};

pub const ANNUAL_PAYABLES_SPEND: IntDomain = IntDomain {
    min: 5_000_000,
    max: 2_000_000_000,
    step: 5_000_000,
    default: 100_000_000,
};

// --- Query string keys ---

pub const KEY_CURRENCY: &str = "c";
pub const KEY_PO_VOLUME: &str = "po";
pub const KEY_NON_PO_VOLUME: &str = "npo";
pub const KEY_DAYS: &str = "days";
pub const KEY_MANUAL_PCT: &str = "manual";
pub const KEY_SPEND: &str = "spend";

/// Canonical emission order of the share query.
pub const QUERY_KEYS: [&str; 6] = [
    KEY_CURRENCY,
    KEY_PO_VOLUME,
    KEY_NON_PO_VOLUME,
    KEY_DAYS,
    KEY_MANUAL_PCT,
    KEY_SPEND,
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn published_benchmarks_are_default() {
        assert_eq!(Benchmarks::default(), PUBLISHED_BENCHMARKS);
    }

    #[test]
    fn best_in_class_beats_average() {
        let b = Benchmarks::default();
        assert!(b.po_cycle_time.best < b.po_cycle_time.average);
        assert!(b.non_po_cycle_time.best < b.non_po_cycle_time.average);
        assert!(b.touchless_rate.best > b.touchless_rate.average);
        assert!(b.payment_yield.high > b.payment_yield.low);
    }

    #[test]
    fn defaults_lie_inside_domains() {
        for d in [
            PO_INVOICE_VOLUME,
            NON_PO_INVOICE_VOLUME,
            MANUAL_INTERVENTION_PCT,
            ANNUAL_PAYABLES_SPEND,
        ] {
            assert!(d.contains(d.default), "default outside {d:?}");
        }
        assert_eq!(DAYS_TO_PROCESS.clamp(DAYS_TO_PROCESS.default), Some(10.0));
    }

    #[test]
    fn int_clamp_bounds() {
        assert_eq!(ANNUAL_PAYABLES_SPEND.clamp(3_000_000), 5_000_000);
        assert_eq!(ANNUAL_PAYABLES_SPEND.clamp(i64::MAX), 2_000_000_000);
        assert_eq!(PO_INVOICE_VOLUME.clamp(-1), 0);
        assert_eq!(MANUAL_INTERVENTION_PCT.clamp(81), 80);
    }

    #[test]
    fn real_clamp_snaps_to_tenths() {
        assert_eq!(DAYS_TO_PROCESS.clamp(20.04), Some(20.0));
        assert_eq!(DAYS_TO_PROCESS.clamp(2.56), Some(2.6));
        assert_eq!(DAYS_TO_PROCESS.clamp(-3.0), Some(1.0));
        assert_eq!(DAYS_TO_PROCESS.clamp(f64::INFINITY), None);
    }

    #[test]
    fn query_keys_are_unique() {
        for (i, a) in QUERY_KEYS.iter().enumerate() {
            for b in &QUERY_KEYS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    proptest! {
        #[test]
        fn real_clamp_is_idempotent(x in -100.0f64..100.0) {
            let once = DAYS_TO_PROCESS.clamp(x).unwrap();
            prop_assert_eq!(DAYS_TO_PROCESS.clamp(once), Some(once));
            prop_assert!((1.0..=20.0).contains(&once));
        }

        #[test]
        fn int_clamp_stays_in_domain(x in any::<i64>()) {
            prop_assert!(ANNUAL_PAYABLES_SPEND.contains(ANNUAL_PAYABLES_SPEND.clamp(x)));
        }
    }
}
