//! Teaching-learning-based optimization for bounded continuous minimization
//! problems.

use std::marker::PhantomData;

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  bounds::Bounds,
  objective::executor::ObjectiveExecutor,
  optimizer::{Generational, Solved},
  population::Population,
  score::{self, Cost, Incumbent},
};

/// A teaching-learning-based optimizer.
///
/// Runs two phases over the whole class per iteration. In the teacher phase
/// every learner steps toward the best learner and away from the scaled
/// class mean; in the learner phase every learner steps toward the cheaper
/// of itself and one random classmate. Both phases replace a learner only on
/// a strictly lower cost. The teacher and the class mean are snapshotted
/// before a phase writes anything back, so replacements within a phase do
/// not shift the targets of later learners.
///
/// The teacher's cost at the start of every iteration is recorded into a
/// history usable for convergence diagnostics; see
/// [`run_with_history`](Tlbo::run_with_history).
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use soma::{
///   bounds::Bounds,
///   optimizer::{tlbo::Tlbo, Optimizer},
/// };
///
/// let bowl = |x: &Vec<f64>| x.iter().map(|v| v * v).sum::<f64>();
/// let tlbo = Tlbo::builder()
///   .learners(20)
///   .iterations(30)
///   .bounds(Bounds::uniform(2, -5.0, 5.0))
///   .objective(bowl)
///   .rng(StdRng::seed_from_u64(1))
///   .build();
/// let solved = tlbo.run();
/// assert!(solved.cost.is_finite());
/// ```
#[derive(TypedBuilder)]
pub struct Tlbo<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> {
  #[builder(setter(
    transform = |learners: usize| {
      assert!(
        learners >= 2,
        "class must contain at least two learners to pair them up"
      );
      learners
    },
    doc = "
The number of learners in the class.

# Panics

Panics if the number is smaller than 2.",
  ))]
  learners: usize,
  #[builder(setter(
    transform = |iterations: usize| {
      assert!(iterations > 0, "iteration count must be positive");
      iterations
    },
    doc = "
The number of iterations to run.

# Panics

Panics if the count is zero.",
  ))]
  iterations: usize,
  bounds: Bounds,
  objective: Obj,
  #[builder(default = StdRng::from_entropy())]
  rng: StdRng,
  #[builder(setter(skip), default)]
  population: Population<Vec<f64>>,
  #[builder(setter(skip), default)]
  history: Vec<Cost>,
  #[builder(setter(skip), default)]
  incumbent: Incumbent<Vec<f64>>,
  #[builder(setter(skip), default)]
  cycle: usize,
  #[builder(setter(skip), default)]
  _objective_strategy: PhantomData<ObjStrat>,
}

impl<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> Tlbo<Obj, ObjStrat> {
  fn prepare(&mut self) {
    if self.population.is_empty() {
      self.population = Population::random_continuous(
        self.learners,
        &self.bounds,
        &mut self.rng,
      );
      let costs =
        self.objective.execute_evaluation(self.population.individuals());
      self.population.set_costs(costs);
    }
  }

  fn propose(&mut self, index: usize, trial: Vec<f64>) {
    let mut trial = trial;
    self.bounds.clamp(&mut trial);
    let cost = score::ensure_finite(self.objective.execute_cost(&trial));
    if cost < self.population.costs()[index] {
      self.population.set(index, trial, cost);
    }
  }

  /// The current class with its costs.
  pub fn population(&mut self) -> &Population<Vec<f64>> {
    self.prepare();
    &self.population
  }

  /// The teacher's cost at the start of every completed iteration.
  pub fn history(&self) -> &[Cost] {
    &self.history
  }

  /// Runs the optimizer to completion and returns the best found solution
  /// together with the per-iteration best-cost trace.
  pub fn run_with_history(mut self) -> (Solved<Vec<f64>>, Vec<Cost>) {
    while self.remaining() > 0 {
      self.advance();
    }
    self.finalize();
    let solved = self.best();
    (solved, self.history)
  }
}

impl<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> Generational<Vec<f64>>
  for Tlbo<Obj, ObjStrat>
{
  fn remaining(&self) -> usize {
    self.iterations - self.cycle
  }

  fn advance(&mut self) {
    if self.cycle >= self.iterations {
      return;
    }
    self.prepare();

    let teacher_index = self.population.best_index();
    let teacher = self.population.individuals()[teacher_index].clone();
    let teacher_cost = self.population.costs()[teacher_index];
    let mean = self.population.centroid();

    self.history.push(teacher_cost);
    self.incumbent.observe(&teacher, teacher_cost);
    info!("iteration {}: best cost {teacher_cost:.3}", self.cycle + 1);

    // teacher phase
    for i in 0..self.learners {
      let factor = f64::from(self.rng.gen_range(1..3u8));
      let pull = self.rng.gen::<f64>();
      let trial: Vec<f64> = self.population.individuals()[i]
        .iter()
        .enumerate()
        .map(|(j, x)| x + pull * (teacher[j] - factor * mean[j]))
        .collect();
      self.propose(i, trial);
    }

    // learner phase
    for i in 0..self.learners {
      let mut partner = self.rng.gen_range(0..self.learners);
      while partner == i {
        partner = self.rng.gen_range(0..self.learners);
      }

      let pull = self.rng.gen::<f64>();
      let toward_self =
        self.population.costs()[i] <= self.population.costs()[partner];
      let trial: Vec<f64> = self.population.individuals()[i]
        .iter()
        .zip(&self.population.individuals()[partner])
        .map(|(x, y)| {
          if toward_self {
            x + pull * (x - y)
          } else {
            x + pull * (y - x)
          }
        })
        .collect();
      self.propose(i, trial);
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
      .expect("no iteration has run yet")
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
  use crate::optimizer::Optimizer;

  fn bowl(x: &Vec<f64>) -> Cost {
    x.iter().map(|v| v * v).sum()
  }

  fn class(seed: u64, iterations: usize) -> Tlbo<
    fn(&Vec<f64>) -> Cost,
    crate::execution::strategy::SequentialExecutionStrategy,
  > {
    Tlbo::builder()
      .learners(30)
      .iterations(iterations)
      .bounds(Bounds::uniform(2, -5.0, 5.0))
      .objective(bowl as fn(&Vec<f64>) -> Cost)
      .rng(StdRng::seed_from_u64(seed))
      .build()
  }

  #[test]
  fn test_bowl_scenario_converges() {
    let solved = class(42, 50).run();
    assert!(solved.cost < 0.1, "final cost was {}", solved.cost);
  }

  #[test]
  fn test_history_traces_every_iteration() {
    let (solved, history) = class(7, 50).run_with_history();
    assert_eq!(history.len(), 50);
    // greedy replacement makes the teacher cost non-increasing
    for pair in history.windows(2) {
      assert!(pair[1] <= pair[0]);
    }
    assert!(solved.cost <= *history.last().expect("history must not be empty"));
  }

  #[test]
  fn test_learners_stay_within_bounds() {
    let bounds = Bounds::uniform(2, -5.0, 5.0);
    let mut tlbo = class(3, 10);
    while tlbo.remaining() > 0 {
      tlbo.advance();
      for learner in tlbo.population().individuals() {
        assert!(bounds.contains(learner));
      }
    }
  }

  #[test]
  fn test_incumbent_cost_never_increases() {
    let mut tlbo = class(5, 20);
    tlbo.advance();
    let mut previous = tlbo.best().cost;
    while tlbo.remaining() > 0 {
      tlbo.advance();
      let current = tlbo.best().cost;
      assert!(current <= previous);
      previous = current;
    }
    tlbo.finalize();
    assert!(tlbo.best().cost <= previous);
  }

  #[test]
  fn test_best_is_idempotent() {
    let mut tlbo = class(9, 5);
    tlbo.advance();
    tlbo.finalize();
    assert_eq!(tlbo.best(), tlbo.best());
  }

  #[test]
  #[should_panic(expected = "at least two learners")]
  fn test_single_learner_class_is_rejected() {
    let _ = Tlbo::builder()
      .learners(1)
      .iterations(1)
      .bounds(Bounds::uniform(2, -5.0, 5.0))
      .objective(bowl as fn(&Vec<f64>) -> Cost)
      .build();
  }
}
