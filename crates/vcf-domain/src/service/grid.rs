//! Grid rounding and neighborhood selection for the reference table

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use vcf_types::{DENSITY_STEP, TEMPERATURE_STEP};

use crate::model::ReferenceEntry;

/// Snap `value` to the nearest multiple of `step`.
///
/// Ties go to the even multiple, so `round_to_grid(10.25, 0.5)` is `10.0`.
/// A negative zero result is returned as `0.0` so it keys the same entry.
pub fn round_to_grid(value: f64, step: f64) -> f64 {
    (value / step).round_ties_even() * step + 0.0
}

/// A (density, temperature) pair snapped to the table grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub density: f64,
    pub temperature: f64,
}

impl GridPoint {
    /// Round raw measurements onto the 0.5 / 0.25 grid
    pub fn snap(density: f64, temperature: f64) -> Self {
        Self {
            density: round_to_grid(density, DENSITY_STEP),
            temperature: round_to_grid(temperature, TEMPERATURE_STEP),
        }
    }

    /// Inclusive neighborhood box: ±0.5 density, ±0.25 temperature
    pub fn contains_neighbor(&self, entry: &ReferenceEntry) -> bool {
        entry.density >= self.density - DENSITY_STEP
            && entry.density <= self.density + DENSITY_STEP
            && entry.temperature >= self.temperature - TEMPERATURE_STEP
            && entry.temperature <= self.temperature + TEMPERATURE_STEP
    }

    /// Euclidean distance to `entry`, measured in grid steps on each axis
    pub fn grid_distance(&self, entry: &ReferenceEntry) -> f64 {
        let dd = (entry.density - self.density) / DENSITY_STEP;
        let dt = (entry.temperature - self.temperature) / TEMPERATURE_STEP;
        dd.hypot(dt)
    }
}

/// Choose the neighborhood match for `center` among `candidates`.
///
/// Only entries inside [`GridPoint::contains_neighbor`] qualify. The winner
/// has the smallest grid distance, then the lowest density, then the lowest
/// temperature, independent of candidate order. This is a tie-break, not a
/// physical nearest-match guarantee.
pub fn pick_neighbor<I>(center: GridPoint, candidates: I) -> Option<ReferenceEntry>
where
    I: IntoIterator<Item = ReferenceEntry>,
{
    candidates
        .into_iter()
        .filter(|entry| entry.is_finite() && center.contains_neighbor(entry))
        .min_by(|a, b| compare_neighbors(center, a, b))
}

fn compare_neighbors(center: GridPoint, a: &ReferenceEntry, b: &ReferenceEntry) -> Ordering {
    center
        .grid_distance(a)
        .total_cmp(&center.grid_distance(b))
        .then_with(|| a.density.total_cmp(&b.density))
        .then_with(|| a.temperature.total_cmp(&b.temperature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_temperature_quarter() {
        assert!((round_to_grid(10.26, 0.25) - 10.25).abs() < f64::EPSILON);
        assert!((round_to_grid(20.1, 0.25) - 20.0).abs() < f64::EPSILON);
        assert!((round_to_grid(20.2, 0.25) - 20.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_density_half() {
        assert!((round_to_grid(10.4, 0.5) - 10.5).abs() < f64::EPSILON);
        assert!((round_to_grid(10.2, 0.5) - 10.0).abs() < f64::EPSILON);
        assert!((round_to_grid(850.74, 0.5) - 850.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_ties_to_even() {
        // 10.25 / 0.5 = 20.5 -> 20
        assert_eq!(round_to_grid(10.25, 0.5), 10.0);
        // 10.75 / 0.5 = 21.5 -> 22
        assert_eq!(round_to_grid(10.75, 0.5), 11.0);
        // 0.125 / 0.25 = 0.5 -> 0
        assert_eq!(round_to_grid(0.125, 0.25), 0.0);
    }

    #[test]
    fn test_round_negative_temperatures() {
        assert_eq!(round_to_grid(-10.3, 0.25), -10.25);
        assert_eq!(round_to_grid(-49.9, 0.25), -50.0);
    }

    #[test]
    fn test_round_never_returns_negative_zero() {
        let rounded = round_to_grid(-0.1, 0.25);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn test_round_is_idempotent() {
        let values = [
            -50.0, -12.37, -0.13, 0.0, 0.26, 10.26, 10.4, 15.125, 99.99, 149.874, 850.3,
            991.75,
        ];
        for step in [0.5, 0.25] {
            for value in values {
                let once = round_to_grid(value, step);
                let twice = round_to_grid(once, step);
                assert_eq!(once, twice, "value {} step {}", value, step);
            }
        }
    }

    #[test]
    fn test_snap_uses_both_steps() {
        let point = GridPoint::snap(10.2, 20.1);
        assert_eq!(point.density, 10.0);
        assert_eq!(point.temperature, 20.0);
    }

    #[test]
    fn test_neighborhood_box_is_inclusive() {
        let center = GridPoint::snap(10.0, 20.0);
        assert!(center.contains_neighbor(&ReferenceEntry::new(10.5, 20.25, 1.0)));
        assert!(center.contains_neighbor(&ReferenceEntry::new(9.5, 19.75, 1.0)));
        assert!(!center.contains_neighbor(&ReferenceEntry::new(11.0, 20.0, 1.0)));
        assert!(!center.contains_neighbor(&ReferenceEntry::new(10.0, 20.5, 1.0)));
    }

    #[test]
    fn test_pick_neighbor_prefers_closest_in_grid_units() {
        let center = GridPoint::snap(10.0, 20.0);
        let candidates = vec![
            ReferenceEntry::new(10.5, 20.25, 0.90),
            ReferenceEntry::new(10.0, 20.25, 0.95),
            ReferenceEntry::new(9.5, 20.25, 0.97),
        ];
        let picked = pick_neighbor(center, candidates).unwrap();
        assert_eq!(picked.vcf, 0.95);
    }

    #[test]
    fn test_pick_neighbor_ties_go_to_lowest_density_then_temperature() {
        let center = GridPoint::snap(10.0, 20.0);
        let candidates = vec![
            ReferenceEntry::new(10.5, 20.0, 0.91),
            ReferenceEntry::new(10.0, 20.25, 0.92),
            ReferenceEntry::new(10.0, 19.75, 0.93),
            ReferenceEntry::new(9.5, 20.0, 0.94),
        ];
        let picked = pick_neighbor(center, candidates.clone()).unwrap();
        assert_eq!(picked.vcf, 0.94);

        let mut reversed = candidates;
        reversed.reverse();
        assert_eq!(pick_neighbor(center, reversed).unwrap().vcf, 0.94);

        let same_density = vec![
            ReferenceEntry::new(10.0, 20.25, 0.92),
            ReferenceEntry::new(10.0, 19.75, 0.93),
        ];
        assert_eq!(pick_neighbor(center, same_density).unwrap().vcf, 0.93);
    }

    #[test]
    fn test_pick_neighbor_ignores_outside_and_non_finite() {
        let center = GridPoint::snap(10.0, 20.0);
        let candidates = vec![
            ReferenceEntry::new(12.0, 20.0, 0.80),
            ReferenceEntry::new(f64::NAN, 20.0, 0.81),
        ];
        assert!(pick_neighbor(center, candidates).is_none());
    }
}
