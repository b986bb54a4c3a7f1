//! Particle swarm optimization for bounded continuous minimization problems.

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

/// A particle swarm optimizer.
///
/// Each particle carries a position, a velocity and the best position it has
/// personally visited; the swarm shares one global best. Velocities start at
/// zero and are never bounded themselves - only the resulting positions are.
/// The inertia weight decays linearly from `inertia_max` to `inertia_min`
/// across the run; a single-iteration run keeps `inertia_max`.
///
/// A particle's personal best is updated on a strictly lower cost, and the
/// global best cascades from that update within the same iteration, so later
/// particles are pulled toward improvements made earlier in the iteration.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use soma::{
///   bounds::Bounds,
///   optimizer::{pso::Pso, Optimizer},
/// };
///
/// let bowl = |x: &Vec<f64>| x.iter().map(|v| v * v).sum::<f64>();
/// let pso = Pso::builder()
///   .particles(30)
///   .iterations(30)
///   .bounds(Bounds::uniform(2, -5.0, 5.0))
///   .objective(bowl)
///   .rng(StdRng::seed_from_u64(1))
///   .build();
/// let solved = pso.run();
/// assert!(solved.cost.is_finite());
/// ```
#[derive(TypedBuilder)]
pub struct Pso<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> {
  #[builder(setter(
    transform = |particles: usize| {
      assert!(particles > 0, "swarm must contain at least one particle");
      particles
    },
    doc = "
The number of particles in the swarm.

# Panics

Panics if the number is zero.",
  ))]
  particles: usize,
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
  /// The cognitive parameter: how strongly a particle is pulled toward its
  /// personal best.
  #[builder(default = 2.0)]
  cognitive: f64,
  /// The social parameter: how strongly a particle is pulled toward the
  /// global best.
  #[builder(default = 2.0)]
  social: f64,
  /// The inertia weight at the end of the run.
  #[builder(default = 0.4)]
  inertia_min: f64,
  /// The inertia weight at the start of the run.
  #[builder(default = 0.6)]
  inertia_max: f64,
  #[builder(default = StdRng::from_entropy())]
  rng: StdRng,
  #[builder(setter(skip), default)]
  population: Population<Vec<f64>>,
  #[builder(setter(skip), default)]
  velocities: Vec<Vec<f64>>,
  #[builder(setter(skip), default)]
  personal: Vec<Vec<f64>>,
  #[builder(setter(skip), default)]
  personal_costs: Vec<Cost>,
  #[builder(setter(skip), default)]
  incumbent: Incumbent<Vec<f64>>,
  #[builder(setter(skip), default)]
  cycle: usize,
  #[builder(setter(skip), default)]
  _objective_strategy: PhantomData<ObjStrat>,
}

impl<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> Pso<Obj, ObjStrat> {
  fn prepare(&mut self) {
    if !self.population.is_empty() {
      return;
    }
    self.population =
      Population::random_continuous(self.particles, &self.bounds, &mut self.rng);
    let costs =
      self.objective.execute_evaluation(self.population.individuals());
    self.population.set_costs(costs);

    self.velocities = vec![vec![0.0; self.bounds.dim()]; self.particles];
    self.personal = self.population.individuals().to_vec();
    self.personal_costs = self.population.costs().to_vec();

    let best = self.population.best_index();
    self
      .incumbent
      .observe(&self.population.individuals()[best], self.population.costs()[best]);
  }

  fn inertia(&self) -> f64 {
    if self.iterations == 1 {
      // the decay formula would divide by zero
      self.inertia_max
    } else {
      self.inertia_max
        - self.cycle as f64 * (self.inertia_max - self.inertia_min)
          / (self.iterations - 1) as f64
    }
  }

  /// The current particle positions with their costs.
  pub fn population(&mut self) -> &Population<Vec<f64>> {
    self.prepare();
    &self.population
  }
}

impl<Obj: ObjectiveExecutor<Vec<f64>, ObjStrat>, ObjStrat> Generational<Vec<f64>>
  for Pso<Obj, ObjStrat>
{
  fn remaining(&self) -> usize {
    self.iterations - self.cycle
  }

  fn advance(&mut self) {
    if self.cycle >= self.iterations {
      return;
    }
    self.prepare();

    info!(
      "iteration {}: best cost {:.3}",
      self.cycle + 1,
      self.incumbent.cost()
    );

    let inertia = self.inertia();
    for i in 0..self.particles {
      let mut position = self.population.individuals()[i].clone();
      {
        let velocity = &mut self.velocities[i];
        let global = self
          .incumbent
          .solution()
          .expect("swarm is evaluated during preparation");
        for k in 0..position.len() {
          let r1 = self.rng.gen::<f64>();
          let r2 = self.rng.gen::<f64>();
          velocity[k] = inertia * velocity[k]
            + self.cognitive * r1 * (self.personal[i][k] - position[k])
            + self.social * r2 * (global[k] - position[k]);
        }
        for (x, v) in position.iter_mut().zip(velocity.iter()) {
          *x += v;
        }
      }
      self.bounds.clamp(&mut position);

      let cost = score::ensure_finite(self.objective.execute_cost(&position));
      self.population.set(i, position.clone(), cost);

      if cost < self.personal_costs[i] {
        self.personal[i] = position.clone();
        self.personal_costs[i] = cost;
        self.incumbent.observe(&position, cost);
      }
    }

    self.cycle += 1;
  }

  fn finalize(&mut self) {}

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
