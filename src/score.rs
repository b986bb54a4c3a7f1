//! The scalar cost type and the best-ever tracker shared by all optimizers.

/// An alias for the scalar cost of a candidate solution.
///
/// Every optimizer in this crate *minimizes*: the lower the cost - the better
/// the solution. If your problem is a maximization one, negate your cost
/// function.
pub type Cost = f64;

/// Rejects non-finite costs before they can enter a population and silently
/// bias selection.
pub(crate) fn ensure_finite(cost: Cost) -> Cost {
  assert!(
    cost.is_finite(),
    "cost function returned a non-finite value: {cost}"
  );
  cost
}

/// The best solution observed so far and its cost.
///
/// Starts empty with an infinite cost and is replaced only by a strictly
/// lower cost - on ties the older solution is kept.
#[derive(Clone, Debug)]
pub struct Incumbent<S> {
  solution: Option<S>,
  cost: Cost,
}

impl<S> Incumbent<S> {
  /// Creates an empty tracker with an infinite cost.
  pub fn new() -> Self {
    Self {
      solution: None,
      cost: Cost::INFINITY,
    }
  }

  /// Records given solution if its cost strictly improves on the best cost
  /// seen so far. Returns `true` if the solution was recorded.
  pub fn observe(&mut self, solution: &S, cost: Cost) -> bool
  where
    S: Clone,
  {
    if cost < self.cost {
      self.cost = cost;
      self.solution = Some(solution.clone());
      true
    } else {
      false
    }
  }

  /// The best cost seen so far, or infinity if nothing was observed yet.
  pub fn cost(&self) -> Cost {
    self.cost
  }

  /// The best solution seen so far, if any.
  pub fn solution(&self) -> Option<&S> {
    self.solution.as_ref()
  }
}

impl<S> Default for Incumbent<S> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_incumbent_starts_empty() {
    let incumbent = Incumbent::<Vec<f64>>::new();
    assert!(incumbent.solution().is_none());
    assert_eq!(incumbent.cost(), Cost::INFINITY);
  }

  #[test]
  fn test_incumbent_records_strict_improvements() {
    let mut incumbent = Incumbent::new();
    assert!(incumbent.observe(&vec![1.0], 5.0));
    assert!(!incumbent.observe(&vec![2.0], 7.0));
    assert!(incumbent.observe(&vec![3.0], 3.0));
    assert_eq!(incumbent.cost(), 3.0);
    assert_eq!(incumbent.solution(), Some(&vec![3.0]));
  }

  #[test]
  fn test_incumbent_keeps_older_solution_on_tie() {
    let mut incumbent = Incumbent::new();
    incumbent.observe(&vec![1.0], 5.0);
    assert!(!incumbent.observe(&vec![2.0], 5.0));
    assert_eq!(incumbent.solution(), Some(&vec![1.0]));
  }

  #[test]
  #[should_panic(expected = "non-finite")]
  fn test_non_finite_cost_is_rejected() {
    ensure_finite(Cost::NAN);
  }
}
