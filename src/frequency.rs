//! Leading digit frequency aggregation

use crate::types::{DigitFrequency, Observation};

/// Aggregator for counting leading digits across observations
pub struct FrequencyAggregator;

impl FrequencyAggregator {
    /// Count leading digits 1-9. Sentinel digit 0 observations are skipped.
    pub fn aggregate(observations: &[Observation]) -> DigitFrequency {
        let mut frequency = DigitFrequency::default();
        for observation in observations {
            frequency.record(observation.first_digit);
        }
        frequency
    }

    /// Aggregate and return the number of valid observations alongside
    pub fn aggregate_with_total(observations: &[Observation]) -> (DigitFrequency, u64) {
        let frequency = Self::aggregate(observations);
        let total = frequency.total();
        (frequency, total)
    }
}
