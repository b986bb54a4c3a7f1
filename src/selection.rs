//! Parent selection operators of the genetic algorithm.

use rand::{rngs::StdRng, Rng};

use crate::score::Cost;

/// An operator that picks, for each parent slot of the next generation, the
/// index of the individual that fills it. The returned indices are consumed
/// pairwise by a [`Crossover`](crate::crossover::Crossover) operator.
///
/// # Examples
/// ```
/// # use soma::selection::Selection;
/// // every individual parents itself
/// let s = |costs: &[f64], _: &mut rand::rngs::StdRng| {
///   (0..costs.len()).collect::<Vec<_>>()
/// };
/// # fn takes_selection<S: Selection>(_: S) {}
/// # takes_selection(s);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Selection {
  /// Returns indices of selected parents, one per parent slot.
  fn select(&self, costs: &[Cost], rng: &mut StdRng) -> Vec<usize>;
}

impl<F> Selection for F
where
  F: Fn(&[Cost], &mut StdRng) -> Vec<usize>,
{
  fn select(&self, costs: &[Cost], rng: &mut StdRng) -> Vec<usize> {
    self(costs, rng)
  }
}

/// Fitness-proportionate selection on a biased roulette wheel.
///
/// Costs are mapped to fitness values `2 - cost / max|cost|`, so the lowest
/// cost owns the largest share of the wheel while the worst individual still
/// keeps a nonzero slice. When every cost is zero the wheel degenerates to
/// uniform selection instead of dividing by zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RouletteSelection();

impl Selection for RouletteSelection {
  fn select(&self, costs: &[Cost], rng: &mut StdRng) -> Vec<usize> {
    let max_abs = costs.iter().fold(0.0, |acc: f64, cost| acc.max(cost.abs()));
    let scale = if max_abs == 0.0 { 1.0 } else { max_abs };
    let mut total = 0.0;
    let mut wheel = Vec::with_capacity(costs.len());
    for cost in costs {
      total += 2.0 - cost / scale;
      wheel.push(total);
    }
    (0..costs.len())
      .map(|_| {
        let threshold = total * rng.gen::<f64>();
        wheel
          .iter()
          .position(|accumulated| *accumulated >= threshold)
          .expect("threshold must not exceed total fitness")
      })
      .collect()
  }
}

/// Binary tournament selection: for each parent slot two contenders are
/// drawn uniformly with replacement and the cheaper one wins. Ties favor the
/// first draw.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TournamentSelection();

impl Selection for TournamentSelection {
  fn select(&self, costs: &[Cost], rng: &mut StdRng) -> Vec<usize> {
    (0..costs.len())
      .map(|_| {
        let first = rng.gen_range(0..costs.len());
        let second = rng.gen_range(0..costs.len());
        if costs[first] <= costs[second] {
          first
        } else {
          second
        }
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;

  fn assert_valid(parents: &[usize], count: usize) {
    assert_eq!(parents.len(), count);
    assert!(parents.iter().all(|index| *index < count));
  }

  #[test]
  fn test_selection_from_closure() {
    let selection =
      |costs: &[Cost], _: &mut StdRng| (0..costs.len()).collect::<Vec<_>>();
    let mut rng = StdRng::seed_from_u64(0);
    let parents = selection.select(&[3.0, 1.0, 2.0], &mut rng);
    assert_eq!(parents, vec![0, 1, 2]);
  }

  #[test]
  fn test_roulette_fills_every_slot() {
    let costs = vec![5.0, -2.0, 0.0, 3.0];
    let mut rng = StdRng::seed_from_u64(1);
    assert_valid(&RouletteSelection().select(&costs, &mut rng), costs.len());
  }

  #[test]
  fn test_roulette_survives_all_zero_costs() {
    let costs = vec![0.0; 6];
    let mut rng = StdRng::seed_from_u64(2);
    assert_valid(&RouletteSelection().select(&costs, &mut rng), costs.len());
  }

  #[test]
  fn test_tournament_fills_every_slot() {
    let costs = vec![4.0, 2.0, 8.0, 1.0, 3.0, 9.0];
    let mut rng = StdRng::seed_from_u64(3);
    assert_valid(&TournamentSelection().select(&costs, &mut rng), costs.len());
  }

  #[test]
  fn test_selection_is_reproducible() {
    let costs = vec![4.0, 2.0, 8.0, 1.0];
    let first =
      TournamentSelection().select(&costs, &mut StdRng::seed_from_u64(7));
    let second =
      TournamentSelection().select(&costs, &mut StdRng::seed_from_u64(7));
    assert_eq!(first, second);
  }
}
