//! Differential evolution for bounded continuous minimization problems.

use std::marker::PhantomData;

use log::info;
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  bounds::Bounds,
  objective::executor::ObjectiveExecutor,
  optimizer::{Generational, Solved},
  population::Population,
  score::{self, Incumbent},
};

/// A differential evolution optimizer.
///
/// Per individual and generation, a trial candidate borrows included
/// dimensions from the scaled difference of three distinct partners and
/// replaces the individual only on a strictly lower cost. Partner draws see
/// replacements made earlier in the same generation. The mutation scale `F`
/// is drawn once, uniformly from `[0, 1)`, when the run starts and held
/// fixed for the whole run.
///
/// The best candidate is recomputed from the population at the start of
/// every generation - reported first, then improved upon - and once more
/// after the loop, so the final report includes the last generation's
/// replacements.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use soma::{
///   bounds::Bounds,
///   optimizer::{de::De, Optimizer},
/// };
///
/// let bowl = |x: &Vec<f64>| x.iter().map(|v| v * v).sum::<f64>();
/// let de = De::builder()
///   .population_size(20)
///   .generations(30)
///   .mutation_rate(0.5)
///   .bounds(Bounds::uniform(2, -5.0, 5.0))
///   .objective(bowl)
///   .rng(StdRng::seed_from_u64(1))
///   .build();
/// let solved = de.run();
/// assert!(solved.cost.is_finite());
/// ```
#[derive(TypedBuilder)]
pub struct De<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> {
  #[builder(setter(
    transform = |size: usize| {
      assert!(
        size >= 4,
        "population size must be at least 4 to draw three distinct partners"
      );
      size
    },
    doc = "
The number of candidate solutions.

# Panics

Panics if the size is smaller than 4.",
  ))]
  population_size: usize,
  #[builder(setter(
    transform = |generations: usize| {
      assert!(generations > 0, "generation count must be positive");
      generations
    },
    doc = "
The number of generations to run.

# Panics

Panics if the count is zero.",
  ))]
  generations: usize,
  #[builder(setter(
    transform = |rate: f64| {
      assert!((0.0..=1.0).contains(&rate), "mutation rate must lie in [0, 1]");
      rate
    },
    doc = "
The probability of a dimension joining the differential mutation. One
uniformly drawn dimension per trial joins regardless.

# Panics

Panics if the rate lies outside `[0, 1]`.",
  ))]
  mutation_rate: f64,
  bounds: Bounds,
  objective: Obj,
  #[builder(default = StdRng::from_entropy())]
  rng: StdRng,
  #[builder(setter(skip), default)]
  scale: Option<f64>,
  #[builder(setter(skip), default)]
  population: Population<Vec<f64>>,
  #[builder(setter(skip), default)]
  incumbent: Incumbent<Vec<f64>>,
  #[builder(setter(skip), default)]
  cycle: usize,
  #[builder(setter(skip), default)]
  _objective_strategy: PhantomData<ObjStrat>,
}

impl<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> De<Obj, ObjStrat> {
  fn prepare(&mut self) {
    if self.population.is_empty() {
      self.population = Population::random_continuous(
        self.population_size,
        &self.bounds,
        &mut self.rng,
      );
      let costs =
        self.objective.execute_evaluation(self.population.individuals());
      self.population.set_costs(costs);
      self.scale = Some(self.rng.gen());
    }
  }

  /// The current population with its costs.
  pub fn population(&mut self) -> &Population<Vec<f64>> {
    self.prepare();
    &self.population
  }
}

impl<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> Generational<Vec<f64>>
  for De<Obj, ObjStrat>
{
  fn remaining(&self) -> usize {
    self.generations - self.cycle
  }

  fn advance(&mut self) {
    if self.cycle >= self.generations {
      return;
    }
    self.prepare();

    let best = self.population.best_index();
    let best_cost = self.population.costs()[best];
    self.incumbent.observe(&self.population.individuals()[best], best_cost);
    info!("generation {}: best cost {best_cost:.3}", self.cycle + 1);

    let scale = self.scale.expect("scale is drawn during preparation");
    let dim = self.bounds.dim();
    for i in 0..self.population_size {
      // three distinct partners, all different from `i`
      let partners = index::sample(&mut self.rng, self.population_size - 1, 3);
      let skip_current = |p: usize| if p >= i { p + 1 } else { p };
      let r1 = skip_current(partners.index(0));
      let r2 = skip_current(partners.index(1));
      let r3 = skip_current(partners.index(2));

      let forced = self.rng.gen_range(0..dim);
      let mut trial = self.population.individuals()[i].clone();
      for j in 0..dim {
        let draw = self.rng.gen::<f64>();
        if draw <= self.mutation_rate || j == forced {
          let individuals = self.population.individuals();
          trial[j] = individuals[r1][j]
            + scale * (individuals[r2][j] - individuals[r3][j]);
        }
      }
      self.bounds.clamp(&mut trial);

      let cost = score::ensure_finite(self.objective.execute_cost(&trial));
      if cost < self.population.costs()[i] {
        self.population.set(i, trial, cost);
      }
    }

    self.cycle += 1;
  }

  fn finalize(&mut self) {
    if self.population.is_empty() {
      return;
    }
    let best = self.population.best_index();
    self
      .incumbent
      .observe(&self.population.individuals()[best], self.population.costs()[best]);
  }

  fn best(&self) -> Solved<Vec<f64>> {
    let solution = self
      .incumbent
      .solution()
      .expect("no generation has been evaluated yet")
      .clone();
    Solved {
      solution,
      cost: self.incumbent.cost(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{optimizer::Optimizer, score::Cost};

  fn bowl(x: &Vec<f64>) -> Cost {
    x.iter().map(|v| v * v).sum()
  }

  fn builder_with_defaults(
    seed: u64,
  ) -> De<fn(&Vec<f64>) -> Cost, crate::execution::strategy::SequentialExecutionStrategy>
  {
    De::builder()
      .population_size(20)
      .generations(50)
      .mutation_rate(0.5)
      .bounds(Bounds::uniform(2, -5.0, 5.0))
      .objective(bowl as fn(&Vec<f64>) -> Cost)
      .rng(StdRng::seed_from_u64(seed))
      .build()
  }

  #[test]
  fn test_bowl_scenario_converges() {
    let solved = builder_with_defaults(42).run();
    assert!(solved.cost < 0.1, "final cost was {}", solved.cost);
    assert_eq!(solved.solution.len(), 2);
  }

  #[test]
  fn test_replacement_is_monotonic_per_individual() {
    let mut de = builder_with_defaults(9);
    let before = de.population().costs().to_vec();
    de.advance();
    let after = de.population().costs();
    for (new, old) in after.iter().zip(&before) {
      assert!(new <= old);
    }
  }

  #[test]
  fn test_candidates_stay_within_bounds() {
    let mut de = builder_with_defaults(13);
    let bounds = Bounds::uniform(2, -5.0, 5.0);
    for _ in 0..10 {
      de.advance();
      for individual in de.population().individuals() {
        assert!(bounds.contains(individual));
      }
    }
  }

  #[test]
  fn test_incumbent_cost_never_increases() {
    let mut de = builder_with_defaults(21);
    de.advance();
    let mut previous = de.best().cost;
    while de.remaining() > 0 {
      de.advance();
      let current = de.best().cost;
      assert!(current <= previous);
      previous = current;
    }
    de.finalize();
    assert!(de.best().cost <= previous);
  }

  #[test]
  fn test_final_report_includes_last_generation() {
    let mut de = builder_with_defaults(17);
    while de.remaining() > 0 {
      de.advance();
    }
    de.finalize();
    let best_index = de.population().best_index();
    assert_eq!(de.best().cost, de.population().costs()[best_index]);
  }

  #[test]
  fn test_best_is_idempotent() {
    let mut de = builder_with_defaults(3);
    de.advance();
    assert_eq!(de.best(), de.best());
  }

  #[test]
  #[should_panic(expected = "at least 4")]
  fn test_tiny_population_is_rejected() {
    let _ = De::builder()
      .population_size(3)
      .generations(1)
      .mutation_rate(0.5)
      .bounds(Bounds::uniform(2, -5.0, 5.0))
      .objective(bowl as fn(&Vec<f64>) -> Cost)
      .build();
  }
}
