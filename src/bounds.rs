//! Feasible-region handling for continuous search spaces.

use rand::Rng;

/// Per-dimension limits of a continuous search space.
///
/// The dimension of a continuous problem is the dimension of its bounds, so
/// a limits/dimension mismatch cannot be expressed. Limits are fixed for the
/// optimizer's lifetime.
///
/// # Examples
/// ```
/// # use soma::bounds::Bounds;
/// let b = Bounds::new(vec![-15.0, -3.0], vec![-5.0, 3.0]);
/// assert_eq!(b.dim(), 2);
/// let b = Bounds::uniform(4, -5.0, 5.0);
/// assert_eq!(b.dim(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
  lower: Vec<f64>,
  upper: Vec<f64>,
}

impl Bounds {
  /// Creates bounds from per-dimension limit vectors.
  ///
  /// # Panics
  ///
  /// Panics if the vectors' lengths differ, no dimensions are given, or some
  /// lower limit exceeds its upper limit.
  pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
    assert_eq!(
      lower.len(),
      upper.len(),
      "limit vectors must have equal lengths"
    );
    assert!(!lower.is_empty(), "bounds must have at least one dimension");
    assert!(
      lower.iter().zip(&upper).all(|(lo, up)| lo <= up),
      "every lower limit must not exceed its upper limit"
    );
    Self { lower, upper }
  }

  /// Creates bounds with the same limits in every dimension.
  ///
  /// # Panics
  ///
  /// Panics if `dim` is zero or `lower` exceeds `upper`.
  pub fn uniform(dim: usize, lower: f64, upper: f64) -> Self {
    Self::new(vec![lower; dim], vec![upper; dim])
  }

  /// The dimension of the search space.
  pub fn dim(&self) -> usize {
    self.lower.len()
  }

  /// Per-dimension lower limits.
  pub fn lower(&self) -> &[f64] {
    &self.lower
  }

  /// Per-dimension upper limits.
  pub fn upper(&self) -> &[f64] {
    &self.upper
  }

  /// Draws a uniform point from the feasible region.
  pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
    self
      .lower
      .iter()
      .zip(&self.upper)
      .map(|(&lo, &up)| lo + (up - lo) * rng.gen::<f64>())
      .collect()
  }

  /// Returns out-of-range values of a candidate to the feasible region.
  ///
  /// A violated limit is replaced with 95% of that limit rather than the
  /// limit itself, so that repaired candidates do not pile up exactly on the
  /// boundary and an operator exploring outward does not re-violate the
  /// limit on the next step.
  pub fn clamp(&self, candidate: &mut [f64]) {
    for ((x, &lo), &up) in candidate.iter_mut().zip(&self.lower).zip(&self.upper)
    {
      if *x > up {
        *x = 0.95 * up;
      } else if *x < lo {
        *x = 0.95 * lo;
      }
    }
  }

  /// Whether every value of a candidate lies within the limits.
  pub fn contains(&self, candidate: &[f64]) -> bool {
    candidate
      .iter()
      .zip(&self.lower)
      .zip(&self.upper)
      .all(|((x, &lo), &up)| lo <= *x && *x <= up)
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  #[test]
  fn test_clamp_repairs_violations_only() {
    let bounds = Bounds::uniform(3, -10.0, 10.0);
    let mut candidate = vec![-12.0, 3.0, 11.0];
    bounds.clamp(&mut candidate);
    assert_eq!(candidate, vec![-9.5, 3.0, 9.5]);
    assert!(bounds.contains(&candidate));
  }

  #[test]
  fn test_clamp_scales_the_violated_limit() {
    let bounds = Bounds::new(vec![-15.0], vec![-5.0]);
    let mut candidate = vec![-20.0];
    bounds.clamp(&mut candidate);
    assert_eq!(candidate, vec![-14.25]);
  }

  #[test]
  fn test_sample_lies_within_limits() {
    let bounds = Bounds::new(vec![-15.0, -3.0], vec![-5.0, 3.0]);
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..100 {
      assert!(bounds.contains(&bounds.sample(&mut rng)));
    }
  }

  #[test]
  #[should_panic(expected = "equal lengths")]
  fn test_mismatched_limits_are_rejected() {
    Bounds::new(vec![0.0, 0.0], vec![1.0]);
  }

  #[test]
  #[should_panic(expected = "must not exceed")]
  fn test_inverted_limits_are_rejected() {
    Bounds::new(vec![2.0], vec![1.0]);
  }

  #[test]
  #[should_panic(expected = "at least one dimension")]
  fn test_empty_bounds_are_rejected() {
    Bounds::uniform(0, 0.0, 1.0);
  }
}
