//! Population storage shared by all optimizers.

use itertools::Itertools;
use rand::Rng;

use crate::{
  bounds::Bounds,
  score::{self, Cost},
};

/// A binary genome: a fixed-length vector of 0/1 genes.
pub type Genome = Vec<u8>;

/// A set of candidate solutions paired with their most recently evaluated
/// costs.
///
/// The cost at index `i` always belongs to the individual at index `i`.
/// Costs may be stale between [`replace`](Population::replace) and the next
/// [`set_costs`](Population::set_costs) - the genetic algorithm relies on
/// this to defer evaluation of freshly created children to the start of the
/// next generation.
#[derive(Clone, Debug, Default)]
pub struct Population<S> {
  individuals: Vec<S>,
  costs: Vec<Cost>,
}

impl<S> Population<S> {
  /// The number of individuals.
  pub fn len(&self) -> usize {
    self.individuals.len()
  }

  /// Whether the population holds no individuals.
  pub fn is_empty(&self) -> bool {
    self.individuals.is_empty()
  }

  /// All individuals, in index order.
  pub fn individuals(&self) -> &[S] {
    &self.individuals
  }

  /// Costs of all individuals, in the same index order.
  pub fn costs(&self) -> &[Cost] {
    &self.costs
  }

  /// Index of the lowest-cost individual.
  ///
  /// # Panics
  ///
  /// Panics if the population is empty or a NaN cost is encountered.
  pub fn best_index(&self) -> usize {
    self
      .costs
      .iter()
      .position_min_by(|a, b| a.partial_cmp(b).expect("NaN cost encountered"))
      .expect("population must not be empty")
  }

  /// Overwrites the individual at `index` together with its cost.
  pub fn set(&mut self, index: usize, individual: S, cost: Cost) {
    self.individuals[index] = individual;
    self.costs[index] = cost;
  }

  /// Replaces all individuals with freshly created ones. The cost vector is
  /// kept until the next [`set_costs`](Population::set_costs) call.
  ///
  /// # Panics
  ///
  /// Panics if the number of individuals changes.
  pub fn replace(&mut self, individuals: Vec<S>) {
    assert_eq!(
      individuals.len(),
      self.individuals.len(),
      "population size must stay constant"
    );
    self.individuals = individuals;
  }

  /// Overwrites the cost vector with freshly evaluated costs.
  ///
  /// # Panics
  ///
  /// Panics if the number of costs does not match the number of individuals
  /// or a cost is non-finite.
  pub fn set_costs(&mut self, costs: Vec<Cost>) {
    assert_eq!(
      costs.len(),
      self.individuals.len(),
      "number of costs must match number of solutions"
    );
    self.costs = costs.into_iter().map(score::ensure_finite).collect();
  }
}

impl Population<Genome> {
  /// Draws `size` genomes of `genes` uniform bits each. Costs are infinite
  /// until the first evaluation.
  pub fn random_binary<R: Rng>(size: usize, genes: usize, rng: &mut R) -> Self {
    let individuals = (0..size)
      .map(|_| (0..genes).map(|_| rng.gen_range(0..2u8)).collect())
      .collect();
    Self {
      individuals,
      costs: vec![Cost::INFINITY; size],
    }
  }
}

impl Population<Vec<f64>> {
  /// Draws `size` uniform points from the feasible region. Costs are
  /// infinite until the first evaluation.
  pub fn random_continuous<R: Rng>(
    size: usize,
    bounds: &Bounds,
    rng: &mut R,
  ) -> Self {
    let individuals = (0..size).map(|_| bounds.sample(rng)).collect();
    Self {
      individuals,
      costs: vec![Cost::INFINITY; size],
    }
  }

  /// The per-dimension mean of all individuals.
  ///
  /// # Panics
  ///
  /// Panics if the population is empty.
  pub fn centroid(&self) -> Vec<f64> {
    let count = self.individuals.len() as f64;
    let dim = self.individuals.first().expect("population must not be empty").len();
    let mut mean = vec![0.0; dim];
    for individual in &self.individuals {
      for (m, x) in mean.iter_mut().zip(individual) {
        *m += x;
      }
    }
    mean.iter_mut().for_each(|m| *m /= count);
    mean
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  #[test]
  fn test_random_binary_population_is_binary() {
    let mut rng = StdRng::seed_from_u64(1);
    let population = Population::random_binary(10, 16, &mut rng);
    assert_eq!(population.len(), 10);
    for genome in population.individuals() {
      assert_eq!(genome.len(), 16);
      assert!(genome.iter().all(|gene| *gene <= 1));
    }
  }

  #[test]
  fn test_random_continuous_population_is_feasible() {
    let mut rng = StdRng::seed_from_u64(2);
    let bounds = Bounds::new(vec![-15.0, -3.0], vec![-5.0, 3.0]);
    let population = Population::random_continuous(20, &bounds, &mut rng);
    for individual in population.individuals() {
      assert!(bounds.contains(individual));
    }
  }

  #[test]
  fn test_best_index_finds_the_lowest_cost() {
    let mut population = Population {
      individuals: vec![vec![0.0], vec![1.0], vec![2.0]],
      costs: vec![3.0, 1.0, 2.0],
    };
    assert_eq!(population.best_index(), 1);
    population.set(2, vec![5.0], 0.5);
    assert_eq!(population.best_index(), 2);
  }

  #[test]
  fn test_centroid() {
    let population = Population {
      individuals: vec![vec![0.0, 4.0], vec![2.0, 0.0]],
      costs: vec![0.0, 0.0],
    };
    assert_eq!(population.centroid(), vec![1.0, 2.0]);
  }

  #[test]
  #[should_panic(expected = "number of costs must match")]
  fn test_mismatched_cost_vector_is_rejected() {
    let mut population =
      Population::random_binary(4, 2, &mut StdRng::seed_from_u64(3));
    population.set_costs(vec![0.0; 3]);
  }

  #[test]
  #[should_panic(expected = "non-finite")]
  fn test_non_finite_costs_are_rejected() {
    let mut population =
      Population::random_binary(2, 2, &mut StdRng::seed_from_u64(4));
    population.set_costs(vec![0.0, Cost::NAN]);
  }

  #[test]
  #[should_panic(expected = "population size must stay constant")]
  fn test_replace_cannot_resize_population() {
    let mut population =
      Population::random_binary(4, 2, &mut StdRng::seed_from_u64(5));
    population.replace(vec![vec![0, 0]; 3]);
  }
}
