//! Mutation operators of the genetic algorithm.

use rand::{rngs::StdRng, Rng};

use crate::population::Genome;

/// An operator that mutates a single genome in place. Applied to every child
/// produced by crossover, independently.
///
/// # Examples
/// ```
/// # use soma::mutation::Mutation;
/// // a mutation that doesn't mutate genomes
/// let m = |_: &mut Vec<u8>, _: &mut rand::rngs::StdRng| {};
/// # fn takes_mutation<M: Mutation>(_: M) {}
/// # takes_mutation(m);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Mutation {
  /// Mutates given genome.
  fn mutate(&self, genome: &mut Genome, rng: &mut StdRng);
}

impl<F> Mutation for F
where
  F: Fn(&mut Genome, &mut StdRng),
{
  fn mutate(&self, genome: &mut Genome, rng: &mut StdRng) {
    self(genome, rng)
  }
}

/// Flips every gene independently with the configured probability.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BitFlipMutation {
  rate: f64,
}

impl BitFlipMutation {
  /// Creates the operator with given per-gene flip probability.
  ///
  /// # Panics
  ///
  /// Panics if the rate lies outside `[0, 1]`.
  pub fn new(rate: f64) -> Self {
    assert!(
      (0.0..=1.0).contains(&rate),
      "mutation rate must lie in [0, 1]"
    );
    Self { rate }
  }
}

impl Mutation for BitFlipMutation {
  fn mutate(&self, genome: &mut Genome, rng: &mut StdRng) {
    for gene in genome.iter_mut() {
      if rng.gen::<f64>() <= self.rate {
        *gene = 1 - *gene;
      }
    }
  }
}

/// With the configured probability per genome, flips exactly one uniformly
/// chosen gene.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SingleBitMutation {
  rate: f64,
}

impl SingleBitMutation {
  /// Creates the operator with given per-genome mutation probability.
  ///
  /// # Panics
  ///
  /// Panics if the rate lies outside `[0, 1]`.
  pub fn new(rate: f64) -> Self {
    assert!(
      (0.0..=1.0).contains(&rate),
      "mutation rate must lie in [0, 1]"
    );
    Self { rate }
  }
}

impl Mutation for SingleBitMutation {
  fn mutate(&self, genome: &mut Genome, rng: &mut StdRng) {
    if rng.gen::<f64>() <= self.rate {
      let gene = rng.gen_range(0..genome.len());
      genome[gene] = 1 - genome[gene];
    }
  }
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;

  #[test]
  fn test_zero_rate_leaves_genome_unchanged() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut genome = vec![0, 1, 0, 1];
    BitFlipMutation::new(0.0).mutate(&mut genome, &mut rng);
    assert_eq!(genome, vec![0, 1, 0, 1]);
    SingleBitMutation::new(0.0).mutate(&mut genome, &mut rng);
    assert_eq!(genome, vec![0, 1, 0, 1]);
  }

  #[test]
  fn test_full_rate_bit_flip_inverts_every_gene() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut genome = vec![0, 1, 0, 1];
    BitFlipMutation::new(1.0).mutate(&mut genome, &mut rng);
    assert_eq!(genome, vec![1, 0, 1, 0]);
  }

  #[test]
  fn test_full_rate_single_bit_flips_exactly_one_gene() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut genome = vec![0, 0, 0, 0, 0, 0];
    SingleBitMutation::new(1.0).mutate(&mut genome, &mut rng);
    let flipped: usize = genome.iter().map(|gene| *gene as usize).sum();
    assert_eq!(flipped, 1);
  }

  #[test]
  fn test_mutation_stays_binary() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut genome = vec![0, 1, 1, 0, 1];
    for _ in 0..50 {
      BitFlipMutation::new(0.5).mutate(&mut genome, &mut rng);
      assert!(genome.iter().all(|gene| *gene <= 1));
    }
  }
}
