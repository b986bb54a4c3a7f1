//! **SOMA** is a Single-Objective Metaheuristic Algorithms framework for
//! minimizing black-box cost functions without gradient information. It
//! strives to be simple, reproducible and highly focused on usage of
//! closures.
//!
//! This crate defines a few abstractions that allow for flexible construction
//! of population-based optimizers:
//! - **Objective** - the cost function under minimization, usually a closure
//! - **Population** - the candidate solutions currently alive, paired with
//!   their costs
//! - **Bounds** - the feasible region of a continuous problem, with a repair
//!   policy for candidates that operators push outside of it
//! - **Operators** - the variant-specific transformations applied to the
//!   population each cycle; the genetic algorithm's **selection**,
//!   **crossover** and **mutation** operators are open for replacement,
//!   including by closures
//! - **Optimizer** - the abstraction that drives the cycle loop and reports
//!   the best found solution
//!
//! # Optimizers
//!
//! Four optimizers are implemented, sharing one generation loop and one
//! best-ever tracker but each supplying its own operator set:
//! - [`Ga`] - a genetic algorithm over binary genomes with interchangeable
//!   selection, crossover and mutation strategies
//! - [`De`] - differential evolution over bounded continuous candidates with
//!   greedy per-individual replacement
//! - [`Pso`] - particle swarm optimization with linearly decaying inertia
//!   and cascading personal/global best updates
//! - [`Tlbo`] - teaching-learning-based optimization with its teacher and
//!   learner phases
//!
//! All four run for a fixed number of cycles - there is no convergence-based
//! early stop. Every optimizer owns its random stream: pass a seeded
//! [`StdRng`](rand::rngs::StdRng) to reproduce a run draw for draw, or let
//! the builder seed one from entropy.
//!
//! # Closures
//!
//! Most operator traits are implemented by closures. An objective is any
//! `Fn(&S) -> f64`; a selection is any `Fn(&[f64], &mut StdRng) ->
//! Vec<usize>`; and so on. Consult the *Implementors* section of operators'
//! documentation to see what closures implement them. Note that this highly
//! generic implementation leads to unreadable compiler error messages that
//! appear not at closure definition, but at creation of an optimizer. If you
//! are struggling with a closure, maybe you should implement a trait
//! directly instead. These implementations are resolved during compilation,
//! so neither approach is less performant.
//!
//! # Parallelization
//!
//! Cost evaluation can be parallelized by calling [`par_each()`] or
//! [`par_batch()`] methods on an objective. This cheap conversion only wraps
//! the operator into a struct, tagging it, so an executor will apply it in
//! parallel to each solution or to their batches of equal size. Everything
//! else stays sequential: the optimizers' update loops are deliberately
//! order-dependent (later candidates see earlier replacements within a
//! cycle), so only the evaluation seam is safe to spread across threads.
//!
//! For simple cost functions, the overhead introduced by parallelization
//! usually only decreases performance, but when you need it, *you need it*.
//! Benchmark, if in doubt.
//!
//! # Progress reporting
//!
//! Each optimizer emits one [`log`] line per cycle with the cost it tracks
//! there. Install any logger implementation (the demos use `env_logger`) to
//! see them, or none to ignore them; the log channel carries no algorithmic
//! state.
//!
//! # Example
//!
//! Here's differential evolution minimizing a two-dimensional bowl. The
//! other optimizers are constructed the same way; see their documentation.
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use soma::{
//!   bounds::Bounds,
//!   optimizer::{de::De, Optimizer},
//! };
//!
//! // cost function with its minimum at the origin
//! let bowl = |x: &Vec<f64>| x.iter().map(|v| v * v).sum::<f64>();
//! let de = De::builder()
//!   .population_size(20)
//!   .generations(40)
//!   .mutation_rate(0.5)
//!   .bounds(Bounds::uniform(2, -5.0, 5.0))
//!   .objective(bowl)
//!   // drop this line for an entropy-seeded, irreproducible run
//!   .rng(StdRng::seed_from_u64(7))
//!   .build();
//! let solved = de.run();
//! assert!(solved.cost.is_finite());
//! ```
//!
//! # Common pitfalls
//!
//! - The genetic algorithm's elitism only *remembers* the best genome ever
//!   evaluated; it does not shield it from crossover or mutation. If you
//!   expect classical survivor elitism, read the [`Ga`] documentation first.
//! - A cost function must return finite values over the whole feasible
//!   region. The optimizers abort on NaN or infinite costs instead of
//!   letting them silently bias selection.
//! - Closures are great and handy to use until they aren't. A subtle mistake
//!   can paint your code red and the error will appear far away from where
//!   you actually made a mistake. Since Rust does not allow you to annotate
//!   your variables with traits, always keep an eye on your closures or just
//!   implement traits for your own types instead.
//!
//! [`Ga`]: crate::optimizer::ga::Ga
//! [`De`]: crate::optimizer::de::De
//! [`Pso`]: crate::optimizer::pso::Pso
//! [`Tlbo`]: crate::optimizer::tlbo::Tlbo
//! [`par_each()`]: crate::operator::ParEach::par_each
//! [`par_batch()`]: crate::operator::ParBatch::par_batch

#![warn(missing_docs)]

pub mod bounds;
pub mod crossover;
pub mod execution;
pub mod mutation;
pub mod objective;
pub mod operator;
pub mod optimizer;
pub mod population;
pub mod score;
pub mod selection;
