//! Benford reference distribution
//!
//! Expected first-digit percentages, hand-rounded to one decimal place.
//! These are literals and must not be recomputed from `log10(1 + 1/d)`.

/// Expected percentage for each leading digit; index 0 is digit 1.
pub const BENFORD_PERCENTAGES: [f64; 9] = [30.1, 17.6, 12.5, 9.7, 7.9, 6.7, 5.8, 5.1, 4.6];

/// Valid leading digits, in scan order
pub const DIGITS: std::ops::RangeInclusive<u8> = 1..=9;

/// Expected percentage for `digit` (1-9), or `None` outside that range
pub fn expected_percentage(digit: u8) -> Option<f64> {
    if (1..=9).contains(&digit) {
        Some(BENFORD_PERCENTAGES[(digit - 1) as usize])
    } else {
        None
    }
}

/// Expected count for `digit` in a dataset of `total` valid observations
pub fn expected_count(digit: u8, total: u64) -> Option<f64> {
    expected_percentage(digit).map(|pct| (pct / 100.0) * total as f64)
}
