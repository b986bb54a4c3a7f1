//! Cost evaluation operators and utilities.

use executor::ObjectiveExecutor;
use rayon::prelude::*;

use crate::{
  execution::strategy::*,
  operator::{
    tag::ObjectiveOperatorTag,
    ParBatch,
    ParBatchOperator,
    ParEach,
    ParEachOperator,
  },
  score::Cost,
};

/// An operator that evaluates the cost of a single solution.
///
/// The optimizers of this crate minimize: the lower the cost - the better the
/// solution. A cost function must return a finite value for every solution
/// lying within the declared feasible region; a non-finite cost aborts the
/// run instead of silently biasing selection.
///
/// Can be applied in parallel to each solution or to batches of solutions
/// by converting it into a parallelized operator with `par_each()` or
/// `par_batch()` methods.
///
/// # Examples
/// ```
/// # use soma::operator::*;
/// let o = |x: &Vec<f64>| x.iter().map(|v| v * v).sum::<f64>();
/// let o = o.par_batch();
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Objective<S> {
  /// Returns the cost of given solution. The lower - the better.
  fn cost(&self, solution: &S) -> Cost;
}

impl<S, F> Objective<S> for F
where
  F: Fn(&S) -> Cost,
{
  fn cost(&self, solution: &S) -> Cost {
    self(solution)
  }
}

impl<S, O> ParEach<ObjectiveOperatorTag, S> for O
where
  S: Sync,
  O: Objective<S> + Sync,
{
}

impl<S, O> ParBatch<ObjectiveOperatorTag, S> for O
where
  S: Sync,
  O: Objective<S> + Sync,
{
}

/// An operator that evaluates costs of all solutions at once.
///
/// # Examples
/// ```
/// let e = |xs: &[Vec<f64>]| xs.iter().map(|x| x[0].abs()).collect();
/// # let _: Vec<f64> = e(&[]);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluator<S> {
  /// Returns a vector of costs for given solutions.
  ///
  /// # Panics
  ///
  /// Doesn't panic itself but will cause a panic during optimization if this
  /// function returns a different number of costs than the number of
  /// solutions.
  fn evaluate(&self, solutions: &[S]) -> Vec<Cost>;
}

impl<S, F> Evaluator<S> for F
where
  F: Fn(&[S]) -> Vec<Cost>,
{
  fn evaluate(&self, solutions: &[S]) -> Vec<Cost> {
    self(solutions)
  }
}

/// This module hides the `Executor` machinery from the user's sight.
pub mod executor {
  use crate::score::Cost;

  /// An internal cost evaluation executor. Implemented for objective
  /// operators and their parallelized forms; an optimizer picks the right
  /// implementation through its execution strategy parameter.
  pub trait ObjectiveExecutor<S, ExecutionStrategy> {
    /// Evaluates the cost of a single solution.
    fn execute_cost(&self, solution: &S) -> Cost;

    /// Evaluates costs of given solutions, optionally parallelizing
    /// operator's application.
    fn execute_evaluation(&self, solutions: &[S]) -> Vec<Cost>;
  }
}

impl<S, E> ObjectiveExecutor<S, CustomExecutionStrategy> for E
where
  E: Evaluator<S>,
{
  fn execute_cost(&self, solution: &S) -> Cost {
    let mut costs = self.evaluate(std::slice::from_ref(solution));
    assert_eq!(
      costs.len(),
      1,
      "number of costs must match number of solutions"
    );
    costs.pop().expect("must be something here")
  }

  fn execute_evaluation(&self, solutions: &[S]) -> Vec<Cost> {
    self.evaluate(solutions)
  }
}

impl<S, O> ObjectiveExecutor<S, SequentialExecutionStrategy> for O
where
  O: Objective<S>,
{
  fn execute_cost(&self, solution: &S) -> Cost {
    self.cost(solution)
  }

  fn execute_evaluation(&self, solutions: &[S]) -> Vec<Cost> {
    solutions.iter().map(|s| self.cost(s)).collect()
  }
}

impl<S, O> ObjectiveExecutor<S, ParallelEachExecutionStrategy>
  for ParEachOperator<ObjectiveOperatorTag, S, O>
where
  S: Sync,
  O: Objective<S> + Sync,
{
  fn execute_cost(&self, solution: &S) -> Cost {
    self.operator().cost(solution)
  }

  fn execute_evaluation(&self, solutions: &[S]) -> Vec<Cost> {
    solutions.par_iter().map(|s| self.operator().cost(s)).collect()
  }
}

impl<S, O> ObjectiveExecutor<S, ParallelBatchExecutionStrategy>
  for ParBatchOperator<ObjectiveOperatorTag, S, O>
where
  S: Sync,
  O: Objective<S> + Sync,
{
  fn execute_cost(&self, solution: &S) -> Cost {
    self.operator().cost(solution)
  }

  fn execute_evaluation(&self, solutions: &[S]) -> Vec<Cost> {
    let chunk_size = (solutions.len() / rayon::current_num_threads()).max(1);
    solutions
      .par_chunks(chunk_size)
      .flat_map_iter(|chunk| chunk.iter().map(|s| self.operator().cost(s)))
      .collect()
  }
}
