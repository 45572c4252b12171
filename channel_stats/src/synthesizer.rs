//! Synthetic monthly history generator.
//!
//! The platform only reports current totals. To give the charts something to
//! draw, a back series is *generated*: for the `i`-th month before today the
//! value is the current total scaled by a linear decay of 5 % per month and a
//! random factor in `[0.8, 1.2)`. None of this is real historical data.
//!
//! Values are clamped at zero: beyond 20 months the decay factor turns
//! negative, and negative counters are meaningless downstream.

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::models::channel::Channel;
use crate::models::history::{HistoryPoint, Metric, SyntheticHistory};

/// Default length of a generated series.
pub const HISTORICAL_MONTHS: u32 = 12;
/// Longest series the generator produces; longer requests are cut to this.
pub const MAX_HISTORICAL_MONTHS: u32 = 120;
/// Spacing between two points.
pub const DAYS_PER_STEP: u64 = 30;
/// Linear decay applied per month back in time, in percent.
pub const DECAY_PERCENT_PER_MONTH: i64 = 5;
/// Lower bound (inclusive) of the random variation factor.
pub const VARIATION_MIN: f64 = 0.8;
/// Upper bound (exclusive) of the random variation factor.
pub const VARIATION_MAX: f64 = 1.2;

/// Supplies the per-point variation factor.
///
/// Implementations other than [`FixedVariation`] should stay within
/// `[VARIATION_MIN, VARIATION_MAX)`.
pub trait VariationSource: Send {
    fn next_variation(&mut self) -> f64;
}

/// Uniform variation drawn from a random number generator.
pub struct RandomVariation<R = StdRng> {
    rng: R,
}

impl RandomVariation<StdRng> {
    /// Seeded from the operating system; every run differs.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// [`seeded`](Self::seeded) when a seed is given, OS entropy otherwise.
    pub fn for_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::seeded)
    }
}

impl<R: Rng + Send> VariationSource for RandomVariation<R> {
    fn next_variation(&mut self) -> f64 {
        self.rng.random_range(VARIATION_MIN..VARIATION_MAX)
    }
}

/// Always returns the same factor. Used to pin the generator in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariation(pub f64);

impl VariationSource for FixedVariation {
    fn next_variation(&mut self) -> f64 {
        self.0
    }
}

/// The current counters a history is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurrentTotals {
    pub subscribers: u64,
    pub views: u64,
    pub videos: u64,
}

impl CurrentTotals {
    fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Subscribers => self.subscribers,
            Metric::Views => self.views,
            Metric::Videos => self.videos,
        }
    }
}

impl From<&Channel> for CurrentTotals {
    fn from(ch: &Channel) -> Self {
        Self {
            subscribers: ch.subscriber_count,
            views: ch.view_count,
            videos: ch.video_count,
        }
    }
}

/// Decay factor `months_back` months ago, in percent. Negative past 20 months.
pub fn growth_percent(months_back: u32) -> i64 {
    100 - DECAY_PERCENT_PER_MONTH * i64::from(months_back)
}

/// `floor(current × growth × variation)`, clamped at zero.
///
/// The growth factor is applied as an integer percentage so that a pinned
/// variation of `1.0` gives exactly `current × (100 − 5·i) / 100` rounded down.
pub fn synthetic_value(current: u64, months_back: u32, variation: f64) -> u64 {
    let percent = growth_percent(months_back);
    if percent <= 0 || current == 0 {
        return 0;
    }
    let scaled = current as f64 * percent as f64 / 100.0 * variation;
    if scaled.is_finite() && scaled > 0.0 {
        scaled.floor() as u64
    } else {
        0
    }
}

/// Generates `months` points per metric, oldest first, the last one 30 days before `today`.
///
/// `months` is capped at [`MAX_HISTORICAL_MONTHS`]. Points whose date would
/// fall before the calendar's start are dropped, so dates stay strictly
/// increasing.
///
/// Variation is drawn independently per metric per point, in the order
/// subscribers, views, videos for each month.
pub fn synthesize(
    totals: CurrentTotals,
    months: u32,
    today: NaiveDate,
    variation: &mut dyn VariationSource,
) -> SyntheticHistory {
    let months = months.min(MAX_HISTORICAL_MONTHS);
    let mut history = SyntheticHistory::empty();
    for metric in Metric::ALL {
        history.series_mut(metric).points.reserve(months as usize);
    }

    for i in (1..=months).rev() {
        let Some(date) = today.checked_sub_days(Days::new(DAYS_PER_STEP * u64::from(i))) else {
            continue;
        };

        for metric in Metric::ALL {
            let value = synthetic_value(totals.get(metric), i, variation.next_variation());
            history
                .series_mut(metric)
                .points
                .push(HistoryPoint { date, value });
        }
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sequence(Vec<f64>, usize);

    impl VariationSource for Sequence {
        fn next_variation(&mut self) -> f64 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pinned_variation_is_exact_decay() {
        for i in 1..=20 {
            let expected = 1000 * (100 - 5 * u64::from(i)) / 100;
            assert_eq!(synthetic_value(1000, i, 1.0), expected, "month {i}");
        }
        assert_eq!(synthetic_value(1000, 12, 1.0), 400);
        assert_eq!(synthetic_value(999, 1, 1.0), 949);
    }

    #[test]
    fn values_are_clamped_past_twenty_months() {
        assert_eq!(synthetic_value(1000, 20, 1.2), 0);
        assert_eq!(synthetic_value(1000, 21, 1.0), 0);
        assert_eq!(synthetic_value(u64::MAX, 40, 1.19), 0);
        assert!(growth_percent(21) < 0);
    }

    #[test]
    fn dates_step_back_thirty_days() {
        let today = day(2024, 6, 30);
        let h = synthesize(CurrentTotals::default(), 3, today, &mut FixedVariation(1.0));
        assert_eq!(
            h.subscribers.dates(),
            vec![day(2024, 4, 1), day(2024, 5, 1), day(2024, 5, 31)]
        );
        assert_eq!(h.views.dates(), h.subscribers.dates());
        assert!(h.synthetic);
    }

    #[test]
    fn variation_is_drawn_per_metric_per_point() {
        let totals = CurrentTotals {
            subscribers: 1000,
            views: 1000,
            videos: 1000,
        };
        let mut seq = Sequence(vec![0.8, 1.0, 1.1], 0);
        let h = synthesize(totals, 1, day(2024, 1, 31), &mut seq);
        assert_eq!(h.subscribers.values(), vec![760]);
        assert_eq!(h.views.values(), vec![950]);
        assert_eq!(h.videos.values(), vec![1045]);
        assert_eq!(seq.1, 3);
    }

    #[test]
    fn zero_months_gives_empty_series() {
        let h = synthesize(CurrentTotals::default(), 0, day(2024, 1, 1), &mut FixedVariation(1.0));
        assert!(h.subscribers.is_empty() && h.views.is_empty() && h.videos.is_empty());
    }

    #[test]
    fn oversized_requests_are_capped() {
        let h = synthesize(
            CurrentTotals::default(),
            4_000_000,
            day(2024, 1, 1),
            &mut FixedVariation(1.0),
        );
        assert_eq!(h.subscribers.len(), MAX_HISTORICAL_MONTHS as usize);
        let dates = h.subscribers.dates();
        assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() == 30));
    }

    #[test]
    fn dates_before_the_calendar_start_are_dropped() {
        let near_min = NaiveDate::MIN + Days::new(65);
        let h = synthesize(CurrentTotals::default(), 12, near_min, &mut FixedVariation(1.0));
        assert_eq!(h.views.len(), 2);
        let dates = h.views.dates();
        assert!(dates[0] < dates[1]);
    }

    #[test]
    fn optional_seed_selects_the_source() {
        let mut a = RandomVariation::for_seed(Some(42));
        let mut b = RandomVariation::seeded(42);
        assert_eq!(a.next_variation(), b.next_variation());
        let x = RandomVariation::for_seed(None).next_variation();
        assert!((VARIATION_MIN..VARIATION_MAX).contains(&x));
    }

    #[test]
    fn seeded_source_is_reproducible_and_in_range() {
        let mut a = RandomVariation::seeded(7);
        let mut b = RandomVariation::seeded(7);
        for _ in 0..1000 {
            let x = a.next_variation();
            assert_eq!(x, b.next_variation());
            assert!((VARIATION_MIN..VARIATION_MAX).contains(&x));
        }
    }
}
