//! Classical empirical randomness test battery.
//!
//! Five test procedures for sample sequences uniform over `[0, 1)`:
//! frequency (monobit), serial (d-tuple), poker (partition), gap, and lag
//! autocorrelation. Each reduces a sequence to a chi-square or correlation
//! statistic plus a p-value through the shared numeric core in this crate.
//!
//! Every test is a pure function of `(sequence, configuration)`: the input
//! is never mutated and no state is shared between calls, so independent
//! tests may run in parallel over the same materialized sequence.
//!
//! Degenerate input (empty sequence, zero variance, zero selection
//! probability, too few samples for the requested tuple size) is a
//! recognized condition, not an error: the test returns a neutral,
//! non-rejecting result with `statistic = 0.0` and `p_value = 1.0`. Only
//! structurally malformed calls (mismatched chi-square input lengths)
//! produce an error. No test ever returns NaN or infinity.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// Chi-square core
// ═══════════════════════════════════════════════════════════════════════════════

/// Error raised for structurally malformed statistic inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatError {
    /// `observed` and `expected` have different lengths. Programmer error,
    /// not a data condition.
    #[error("observed/expected length mismatch: {observed} vs {expected}")]
    LengthMismatch { observed: usize, expected: usize },
}

/// Chi-square goodness-of-fit statistic `Σ (o_i − e_i)² / e_i`.
///
/// Bins with `e_i == 0` contribute zero to the sum. Empty expectation bins
/// are common at extreme tail configurations and are tolerated rather than
/// rejected.
pub fn chi_square_statistic(observed: &[f64], expected: &[f64]) -> Result<f64, StatError> {
    if observed.len() != expected.len() {
        return Err(StatError::LengthMismatch {
            observed: observed.len(),
            expected: expected.len(),
        });
    }
    Ok(observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| if e == 0.0 { 0.0 } else { (o - e) * (o - e) / e })
        .sum())
}

/// Upper-tail p-value for a chi-square statistic with `df` degrees of
/// freedom.
///
/// `df == 0` means no uncertainty: the fit is treated as certain and the
/// p-value is 1.0. The result is clamped to `[0, 1]`.
pub fn chi_square_p_value(statistic: f64, df: usize) -> f64 {
    if df == 0 {
        return 1.0;
    }
    let dist = ChiSquared::new(df as f64).unwrap();
    dist.sf(statistic).clamp(0.0, 1.0)
}

/// Two-sided normal p-value for a z-score, clamped to `[0, 1]`.
fn two_sided_normal_p(z: f64) -> f64 {
    let norm = Normal::standard();
    (2.0 * (1.0 - norm.cdf(z.abs()))).clamp(0.0, 1.0)
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. FREQUENCY (MONOBIT) TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of the frequency (monobit) test.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyResult {
    /// Samples below the 0.5 threshold.
    pub zeros: u64,
    /// Samples at or above the 0.5 threshold.
    pub ones: u64,
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
}

/// Frequency (monobit) test: partitions samples at 0.5 into two bins and
/// compares against the uniform expectation `n/2` per bin, df 1.
pub fn frequency_test(samples: &[f64]) -> FrequencyResult {
    if samples.is_empty() {
        return FrequencyResult {
            zeros: 0,
            ones: 0,
            statistic: 0.0,
            df: 0,
            p_value: 1.0,
        };
    }

    let n = samples.len();
    let ones = samples.iter().filter(|&&v| v >= 0.5).count() as u64;
    let zeros = n as u64 - ones;
    let expected = n as f64 / 2.0;

    let statistic = chi_square_statistic(&[zeros as f64, ones as f64], &[expected, expected])
        .expect("paired bins");
    FrequencyResult {
        zeros,
        ones,
        statistic,
        df: 1,
        p_value: chi_square_p_value(statistic, 1),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. SERIAL (D-TUPLE) TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Serial test configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SerialConfig {
    /// Window length.
    pub d: usize,
    /// Equal-width quantization buckets per coordinate.
    pub bins: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { d: 2, bins: 10 }
    }
}

/// Result of the serial (d-tuple) test.
#[derive(Debug, Clone, Serialize)]
pub struct SerialResult {
    pub d: usize,
    pub bins: usize,
    /// Total cells, `bins^d`.
    pub cells: usize,
    /// Overlapping windows counted, `n − d + 1`.
    pub windows: usize,
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
}

/// Serial (d-tuple) test: forms overlapping `d`-length windows, maps each
/// to one of `bins^d` cells by quantizing every coordinate independently,
/// and chi-squares the cell counts against a uniform expectation.
///
/// Coordinates quantize as `floor(value·bins)` clamped to `bins − 1`, so a
/// boundary value of exactly 1.0 lands in the top bucket. Sequences
/// shorter than `d` have no complete window and yield the neutral result.
pub fn serial_test(samples: &[f64], config: &SerialConfig) -> SerialResult {
    let SerialConfig { d, bins } = *config;
    // bins^d can exceed usize for large configurations; an unrepresentable
    // cell count is a degenerate configuration, not a panic
    let cells = if d == 0 || bins == 0 {
        0
    } else {
        u32::try_from(d)
            .ok()
            .and_then(|exp| bins.checked_pow(exp))
            .unwrap_or(0)
    };
    let df = cells.saturating_sub(1);
    let n = samples.len();

    if cells == 0 || n < d {
        return SerialResult {
            d,
            bins,
            cells,
            windows: 0,
            statistic: 0.0,
            df,
            p_value: 1.0,
        };
    }

    let windows = n - d + 1;
    let mut counts = vec![0u64; cells];
    for window in samples.windows(d) {
        let mut idx = 0usize;
        for &v in window {
            let q = ((v * bins as f64).floor() as usize).min(bins - 1);
            idx = idx * bins + q;
        }
        counts[idx] += 1;
    }

    let observed: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let expected = vec![windows as f64 / cells as f64; cells];
    let statistic = chi_square_statistic(&observed, &expected).expect("one expectation per cell");

    SerialResult {
        d,
        bins,
        cells,
        windows,
        statistic,
        df,
        p_value: chi_square_p_value(statistic, df),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. POKER (PARTITION) TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Hand classes for the poker test, by digit repetition pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HandClass {
    FiveOfAKind,
    FourOfAKind,
    FullHouse,
    ThreeOfAKind,
    TwoPairs,
    OnePair,
    AllDifferent,
}

impl HandClass {
    /// Every class, in result-array order.
    pub const ALL: [HandClass; 7] = [
        HandClass::FiveOfAKind,
        HandClass::FourOfAKind,
        HandClass::FullHouse,
        HandClass::ThreeOfAKind,
        HandClass::TwoPairs,
        HandClass::OnePair,
        HandClass::AllDifferent,
    ];

    /// Closed-form probability of this class among the 10^5 ordered
    /// 5-digit strings. The seven probabilities sum to exactly 1.
    pub fn probability(self) -> f64 {
        const POOL: f64 = 100_000.0;
        match self {
            // one digit, all five positions
            HandClass::FiveOfAKind => 10.0 / POOL,
            // digit of the four, C(5,4) placements, distinct fifth digit
            HandClass::FourOfAKind => 10.0 * 5.0 * 9.0 / POOL,
            // triple digit, C(5,3) placements, pair digit
            HandClass::FullHouse => 10.0 * 10.0 * 9.0 / POOL,
            // triple digit, C(5,3) placements, two distinct ordered leftovers
            HandClass::ThreeOfAKind => 10.0 * 10.0 * (9.0 * 8.0) / POOL,
            // C(10,2) pair digits, C(5,2)·C(3,2) placements, single digit
            HandClass::TwoPairs => 45.0 * (10.0 * 3.0) * 8.0 / POOL,
            // pair digit, C(5,2) placements, three distinct ordered leftovers
            HandClass::OnePair => 10.0 * 10.0 * (9.0 * 8.0 * 7.0) / POOL,
            // ordered 5-permutations of 10 digits
            HandClass::AllDifferent => (10.0 * 9.0 * 8.0 * 7.0 * 6.0) / POOL,
        }
    }
}

impl std::fmt::Display for HandClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FiveOfAKind => write!(f, "five_of_a_kind"),
            Self::FourOfAKind => write!(f, "four_of_a_kind"),
            Self::FullHouse => write!(f, "full_house"),
            Self::ThreeOfAKind => write!(f, "three_of_a_kind"),
            Self::TwoPairs => write!(f, "two_pairs"),
            Self::OnePair => write!(f, "one_pair"),
            Self::AllDifferent => write!(f, "all_different"),
        }
    }
}

/// Poker test configuration.
#[derive(Debug, Clone, Serialize)]
pub struct PokerConfig {
    /// Decimal digits rendered per sample. Classification and the expected
    /// probabilities are the classical 5-digit ones; values other than 5
    /// leave unmatched repetition patterns unclassified.
    pub digits: u32,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self { digits: 5 }
    }
}

/// Result of the poker (partition) test.
///
/// `counts` and `expected` are indexed by [`HandClass::ALL`] order; every
/// class is present even with zero observations.
#[derive(Debug, Clone, Serialize)]
pub struct PokerResult {
    pub counts: [u64; 7],
    pub expected: [f64; 7],
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
}

impl PokerResult {
    /// Observed count for a class.
    pub fn count(&self, class: HandClass) -> u64 {
        self.counts[class as usize]
    }

    /// Expected count for a class.
    pub fn expected_count(&self, class: HandClass) -> f64 {
        self.expected[class as usize]
    }
}

/// Classify a digit multiset by its sorted-descending frequency signature.
fn classify(signature: &[u32]) -> Option<HandClass> {
    match signature {
        [5] => Some(HandClass::FiveOfAKind),
        [4, 1] => Some(HandClass::FourOfAKind),
        [3, 2] => Some(HandClass::FullHouse),
        [3, 1, 1] => Some(HandClass::ThreeOfAKind),
        [2, 2, 1] => Some(HandClass::TwoPairs),
        [2, 1, 1, 1] => Some(HandClass::OnePair),
        [1, 1, 1, 1, 1] => Some(HandClass::AllDifferent),
        _ => None,
    }
}

/// Poker (partition) test: renders decimal digits per sample, classifies
/// each digit multiset into one of seven hand classes and chi-squares the
/// class counts against the classical 5-digit probabilities, df 6.
pub fn poker_test(samples: &[f64], config: &PokerConfig) -> PokerResult {
    let expected_of = |n: f64| {
        let mut expected = [0.0f64; 7];
        for class in HandClass::ALL {
            expected[class as usize] = class.probability() * n;
        }
        expected
    };

    if samples.is_empty() {
        return PokerResult {
            counts: [0; 7],
            expected: expected_of(0.0),
            statistic: 0.0,
            df: 6,
            p_value: 1.0,
        };
    }

    let mut counts = [0u64; 7];
    for &v in samples {
        let mut digit_counts = [0u32; 10];
        let mut x = v;
        for _ in 0..config.digits {
            x *= 10.0;
            let digit = x.floor();
            // clamp absorbs the boundary case v == 1.0
            digit_counts[(digit as usize).min(9)] += 1;
            x -= digit;
        }
        let mut signature: Vec<u32> = digit_counts.iter().copied().filter(|&c| c > 0).collect();
        signature.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(class) = classify(&signature) {
            counts[class as usize] += 1;
        }
    }

    let expected = expected_of(samples.len() as f64);
    let observed: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let statistic =
        chi_square_statistic(&observed, &expected).expect("seven classes on both sides");

    PokerResult {
        counts,
        expected,
        statistic,
        df: 6,
        p_value: chi_square_p_value(statistic, 6),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. GAP TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Gap test configuration.
#[derive(Debug, Clone, Serialize)]
pub struct GapConfig {
    /// Inclusive lower bound of the target interval.
    pub a: f64,
    /// Exclusive upper bound of the target interval.
    pub b: f64,
    /// Top gap-length bin; longer gaps fall into it as an overflow
    /// catch-all.
    pub max_gap_bin: usize,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            a: 0.2,
            b: 0.3,
            max_gap_bin: 10,
        }
    }
}

/// Result of the gap test.
#[derive(Debug, Clone, Serialize)]
pub struct GapResult {
    /// Target interval `[a, b)`.
    pub interval: (f64, f64),
    /// Hit probability `b − a`.
    pub p_interval: f64,
    /// Observed gaps (hits in the interval).
    pub n_gaps: u64,
    /// Gap-length counts, bins `0..=max_gap_bin`.
    pub observed: Vec<u64>,
    /// Geometric-law expected counts per bin.
    pub expected: Vec<f64>,
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
}

/// Gap test: scans the sequence once, counting consecutive misses before
/// each value falling in `[a, b)`, and chi-squares the gap-length
/// histogram against the geometric law `P(gap = k) = (1 − p)^k · p` with
/// the remaining mass in the overflow bin, df `max_gap_bin`.
///
/// `p ≤ 0` and zero observed gaps are degenerate conditions yielding the
/// neutral result; `interval` and `p_interval` are present either way.
pub fn gap_test(samples: &[f64], config: &GapConfig) -> GapResult {
    let GapConfig { a, b, max_gap_bin } = *config;
    let p = b - a;

    let neutral = |p_value: f64| GapResult {
        interval: (a, b),
        p_interval: p,
        n_gaps: 0,
        observed: Vec::new(),
        expected: Vec::new(),
        statistic: 0.0,
        df: 0,
        p_value,
    };

    if samples.is_empty() || p <= 0.0 {
        return neutral(1.0);
    }

    let mut gaps: Vec<u64> = Vec::new();
    let mut current = 0u64;
    for &v in samples {
        if v >= a && v < b {
            gaps.push(current);
            current = 0;
        } else {
            current += 1;
        }
    }

    let n_gaps = gaps.len() as u64;
    if n_gaps == 0 {
        return neutral(1.0);
    }

    let mut observed = vec![0u64; max_gap_bin + 1];
    for g in gaps {
        observed[(g as usize).min(max_gap_bin)] += 1;
    }

    let n = n_gaps as f64;
    let mut expected: Vec<f64> = (0..max_gap_bin)
        .map(|k| n * (1.0 - p).powi(k as i32) * p)
        .collect();
    expected.push(n * (1.0 - p).powi(max_gap_bin as i32));

    let observed_f: Vec<f64> = observed.iter().map(|&c| c as f64).collect();
    let statistic = chi_square_statistic(&observed_f, &expected).expect("one bin per gap length");
    let df = max_gap_bin;

    GapResult {
        interval: (a, b),
        p_interval: p,
        n_gaps,
        observed,
        expected,
        statistic,
        df,
        p_value: chi_square_p_value(statistic, df),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. CORRELATION (LAG AUTOCORRELATION) TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Correlation test configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationConfig {
    /// Lags to evaluate.
    pub lags: Vec<usize>,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            lags: vec![1, 2, 5, 10],
        }
    }
}

/// Autocorrelation at a single lag.
#[derive(Debug, Clone, Serialize)]
pub struct LagCorrelation {
    pub lag: usize,
    /// Sample autocorrelation coefficient.
    pub rho: f64,
    /// Test statistic `rho · sqrt(n)`.
    pub z: f64,
    /// Two-sided normal p-value.
    pub p_value: f64,
}

/// Result of the correlation test across all requested lags.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationResult {
    pub mean: f64,
    pub variance: f64,
    pub lags: Vec<LagCorrelation>,
}

/// Lag autocorrelation test: for each requested lag computes the sample
/// autocovariance over variance to get `rho`, then `z = rho · sqrt(n)`
/// with a two-sided normal p-value.
///
/// Out-of-domain lags (`0` or `>= n`) and zero variance report no
/// detectable correlation (`rho = 0, z = 0, p = 1`) rather than an
/// undefined ratio.
pub fn correlation_test(samples: &[f64], config: &CorrelationConfig) -> CorrelationResult {
    let neutral_lag = |lag: usize| LagCorrelation {
        lag,
        rho: 0.0,
        z: 0.0,
        p_value: 1.0,
    };

    let n = samples.len();
    if n == 0 {
        return CorrelationResult {
            mean: 0.0,
            variance: 0.0,
            lags: config.lags.iter().map(|&l| neutral_lag(l)).collect(),
        };
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;

    let lags = config
        .lags
        .iter()
        .map(|&lag| {
            if lag == 0 || lag >= n || variance < 1e-10 {
                return neutral_lag(lag);
            }
            let count = n - lag;
            let acov: f64 = (0..count)
                .map(|i| (samples[i] - mean) * (samples[i + lag] - mean))
                .sum::<f64>()
                / count as f64;
            let rho = acov / variance;
            let z = rho * (n as f64).sqrt();
            LagCorrelation {
                lag,
                rho,
                z,
                p_value: two_sided_normal_p(z),
            }
        })
        .collect();

    CorrelationResult {
        mean,
        variance,
        lags,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Test battery
// ═══════════════════════════════════════════════════════════════════════════════

/// All five test results for one sequence, default configurations.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryReport {
    pub frequency: FrequencyResult,
    pub serial: SerialResult,
    pub poker: PokerResult,
    pub gap: GapResult,
    pub correlation: CorrelationResult,
}

/// Run the full battery with default configurations.
pub fn run_battery(samples: &[f64]) -> BatteryReport {
    let frequency = frequency_test(samples);
    let serial = serial_test(samples, &SerialConfig::default());
    let poker = poker_test(samples, &PokerConfig::default());
    let gap = gap_test(samples, &GapConfig::default());
    let correlation = correlation_test(samples, &CorrelationConfig::default());

    log::debug!(
        "battery over {} samples: frequency p={:.4}, serial p={:.4}, poker p={:.4}, gap p={:.4}",
        samples.len(),
        frequency.p_value,
        serial.p_value,
        poker.p_value,
        gap.p_value,
    );

    BatteryReport {
        frequency,
        serial,
        poker,
        gap,
        correlation,
    }
}
