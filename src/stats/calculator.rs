//! Statistics Calculator Module
//! Five-number summaries per category for the box plot.

use crate::data::{DataProcessor, LikeObservation};
use rayon::prelude::*;
use serde::Serialize;

/// Minimum, quartiles and maximum of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summary for one platform. `summary` is `None` when the group holds no
/// numeric values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub summary: Option<FiveNumberSummary>,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the five-number summary. NaN and infinite values are ignored.
    pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(FiveNumberSummary {
            min: sorted[0],
            q1: Self::quantile(&sorted, 0.25),
            median: Self::quantile(&sorted, 0.5),
            q3: Self::quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Quantile of sorted values using linear interpolation (NumPy compatible).
    /// `p` is a fraction in `[0, 1]`.
    pub fn quantile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * frac
        }
    }

    /// Summaries for every platform, in first-appearance order.
    pub fn summarize_by_platform(rows: &[LikeObservation]) -> Vec<GroupSummary> {
        let groups =
            DataProcessor::group_in_order(rows.iter().map(|r| (r.platform.as_str(), r.likes)));

        // par_iter keeps input order on collect
        groups
            .par_iter()
            .map(|(group, values)| GroupSummary {
                group: group.clone(),
                count: values.len(),
                summary: Self::five_number_summary(values),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(platform: &str, likes: f64) -> LikeObservation {
        LikeObservation {
            platform: platform.to_string(),
            likes,
        }
    }

    #[test]
    fn quartiles_of_one_to_nine() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let summary = StatsCalculator::five_number_summary(&values).unwrap();

        assert_eq!(
            summary,
            FiveNumberSummary {
                min: 1.0,
                q1: 3.0,
                median: 5.0,
                q3: 7.0,
                max: 9.0,
            }
        );
    }

    #[test]
    fn quartiles_interpolate_between_ranks() {
        let summary = StatsCalculator::five_number_summary(&[4.0, 1.0, 3.0, 2.0]).unwrap();

        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn single_value_is_degenerate() {
        let summary = StatsCalculator::five_number_summary(&[42.0]).unwrap();
        assert_eq!(summary.q1, summary.q3);
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.max, 42.0);
    }

    #[test]
    fn nan_values_are_ignored() {
        let summary = StatsCalculator::five_number_summary(&[f64::NAN, 2.0, 1.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 2.0);
        assert_eq!(summary.median, 1.5);

        assert_eq!(StatsCalculator::five_number_summary(&[f64::NAN]), None);
        assert_eq!(StatsCalculator::five_number_summary(&[]), None);
    }

    #[test]
    fn infinite_values_are_ignored() {
        let summary =
            StatsCalculator::five_number_summary(&[f64::INFINITY, 3.0, f64::NEG_INFINITY, 5.0])
                .unwrap();
        assert_eq!((summary.min, summary.max), (3.0, 5.0));
        assert!(StatsCalculator::five_number_summary(&[f64::INFINITY]).is_none());
    }

    #[test]
    fn summarizes_platforms_in_first_appearance_order() {
        let rows = vec![
            obs("Twitter", 10.0),
            obs("Facebook", 5.0),
            obs("Twitter", 30.0),
            obs("LinkedIn", f64::NAN),
            obs("Twitter", 20.0),
        ];
        let summaries = StatsCalculator::summarize_by_platform(&rows);

        let names: Vec<&str> = summaries.iter().map(|s| s.group.as_str()).collect();
        assert_eq!(names, vec!["Twitter", "Facebook", "LinkedIn"]);

        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[0].summary.unwrap().median, 20.0);
        assert_eq!(summaries[1].summary.unwrap().q3, 5.0);
        assert_eq!(summaries[2].summary, None);
    }
}
