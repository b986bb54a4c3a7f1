//! The genetic algorithm for binary-encoded minimization problems.

use std::marker::PhantomData;

use itertools::Itertools;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  crossover::Crossover,
  mutation::Mutation,
  objective::executor::ObjectiveExecutor,
  optimizer::{Generational, Solved},
  population::{Genome, Population},
  score::{Cost, Incumbent},
  selection::Selection,
};

/// A genetic algorithm over binary genomes.
///
/// Evolves `population_size` genomes of `genes` bits each through a
/// *selection - crossover - mutation* cycle for exactly `generations`
/// generations. The population is evaluated at the start of every
/// generation; the children created by the last generation are never
/// evaluated, so the reported best always comes from an evaluated
/// population.
///
/// Elitism here means that the best genome ever evaluated is *remembered and
/// reported* - it is never reinserted into the operated population, so a
/// generation may well lose its best individual to crossover or mutation
/// without affecting the reported result. This differs from the survivor
/// elitism of many genetic algorithm texts; readers expecting the best
/// individual to survive unmutated should take note. Without elitism the
/// reported best is the best of the final evaluated generation.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use soma::{
///   crossover::PointCrossover,
///   mutation::BitFlipMutation,
///   optimizer::{ga::Ga, Optimizer},
///   selection::TournamentSelection,
/// };
///
/// // count of zeros: the all-ones genome is optimal
/// let zeros = |genome: &Vec<u8>| {
///   genome.iter().filter(|gene| **gene == 0).count() as f64
/// };
/// let ga = Ga::builder()
///   .population_size(20)
///   .genes(16)
///   .generations(30)
///   .objective(zeros)
///   .selection(TournamentSelection())
///   .crossover(PointCrossover::new(0.8))
///   .mutation(BitFlipMutation::new(0.05))
///   .rng(StdRng::seed_from_u64(42))
///   .build();
/// let solved = ga.run();
/// assert!(solved.cost <= 16.0);
/// ```
#[derive(TypedBuilder)]
pub struct Ga<
  Obj: ObjectiveExecutor<Genome, ObjStrat>,
  Sel: Selection,
  Crs: Crossover,
  Mut: Mutation,
  ObjStrat,
> {
  #[builder(setter(
    transform = |size: usize| {
      assert!(
        size >= 2 && size % 2 == 0,
        "population size must be even to pair parents for crossover"
      );
      size
    },
    doc = "
The number of genomes in the population.

# Panics

Panics if the size is odd or smaller than 2.",
  ))]
  population_size: usize,
  #[builder(setter(
    transform = |genes: usize| {
      assert!(genes > 0, "genomes must have at least one gene");
      genes
    },
    doc = "
The number of genes in a genome, i.e. the problem dimension.

# Panics

Panics if the number is zero.",
  ))]
  genes: usize,
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
  objective: Obj,
  selection: Sel,
  crossover: Crs,
  mutation: Mut,
  #[builder(default = true)]
  elitism: bool,
  #[builder(default = StdRng::from_entropy())]
  rng: StdRng,
  #[builder(setter(skip), default)]
  population: Population<Genome>,
  #[builder(setter(skip), default)]
  incumbent: Incumbent<Genome>,
  #[builder(setter(skip), default)]
  last_best: Option<(Genome, Cost)>,
  #[builder(setter(skip), default)]
  cycle: usize,
  #[builder(setter(skip), default)]
  _objective_strategy: PhantomData<ObjStrat>,
}

impl<
    Obj: ObjectiveExecutor<Genome, ObjStrat>,
    Sel: Selection,
    Crs: Crossover,
    Mut: Mutation,
    ObjStrat,
  > Ga<Obj, Sel, Crs, Mut, ObjStrat>
{
  fn prepare(&mut self) {
    if self.population.is_empty() {
      self.population =
        Population::random_binary(self.population_size, self.genes, &mut self.rng);
    }
  }

  /// The current population. Children created by the most recent generation
  /// keep the previous generation's costs until the next cycle evaluates
  /// them.
  pub fn population(&mut self) -> &Population<Genome> {
    self.prepare();
    &self.population
  }
}

impl<
    Obj: ObjectiveExecutor<Genome, ObjStrat>,
    Sel: Selection,
    Crs: Crossover,
    Mut: Mutation,
    ObjStrat,
  > Generational<Genome> for Ga<Obj, Sel, Crs, Mut, ObjStrat>
{
  fn remaining(&self) -> usize {
    self.generations - self.cycle
  }

  fn advance(&mut self) {
    if self.cycle >= self.generations {
      return;
    }
    self.prepare();

    let costs = self.objective.execute_evaluation(self.population.individuals());
    self.population.set_costs(costs);

    let best = self.population.best_index();
    let best_cost = self.population.costs()[best];
    self.last_best =
      Some((self.population.individuals()[best].clone(), best_cost));
    if self.elitism {
      self.incumbent.observe(&self.population.individuals()[best], best_cost);
      info!(
        "generation {}: best cost {:.3}",
        self.cycle + 1,
        self.incumbent.cost()
      );
    } else {
      info!("generation {}: best cost {best_cost:.3}", self.cycle + 1);
    }

    let parents = self.selection.select(self.population.costs(), &mut self.rng);
    assert_eq!(
      parents.len(),
      self.population_size,
      "selection must fill every parent slot"
    );

    let mut children = Vec::with_capacity(self.population_size);
    for (first, second) in parents.into_iter().tuples() {
      let (child1, child2) = self.crossover.cross(
        &self.population.individuals()[first],
        &self.population.individuals()[second],
        &mut self.rng,
      );
      children.push(child1);
      children.push(child2);
    }
    for child in &mut children {
      self.mutation.mutate(child, &mut self.rng);
    }
    self.population.replace(children);

    self.cycle += 1;
  }

  fn finalize(&mut self) {
    if let Some((genome, cost)) = self.last_best.take() {
      self.incumbent.observe(&genome, cost);
    }
  }

  fn best(&self) -> Solved<Genome> {
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
