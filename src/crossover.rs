//! Crossover operators of the genetic algorithm.

use rand::{rngs::StdRng, Rng};

use crate::population::Genome;

/// An operator that recombines a consecutive pair of parents into two
/// children. Whether any genetic material is exchanged at all is up to the
/// operator; both provided implementations return plain copies of the
/// parents unless a draw against their crossover rate succeeds.
///
/// # Examples
/// ```
/// # use soma::crossover::Crossover;
/// // children swap whole genomes
/// let c = |a: &[u8], b: &[u8], _: &mut rand::rngs::StdRng| {
///   (b.to_vec(), a.to_vec())
/// };
/// # fn takes_crossover<C: Crossover>(_: C) {}
/// # takes_crossover(c);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Crossover {
  /// Returns two children created from given parents.
  fn cross(&self, first: &[u8], second: &[u8], rng: &mut StdRng)
    -> (Genome, Genome);
}

impl<F> Crossover for F
where
  F: Fn(&[u8], &[u8], &mut StdRng) -> (Genome, Genome),
{
  fn cross(
    &self,
    first: &[u8],
    second: &[u8],
    rng: &mut StdRng,
  ) -> (Genome, Genome) {
    self(first, second, rng)
  }
}

/// Single-point crossover: with the configured probability the children swap
/// their prefixes up to one uniformly drawn split point, otherwise they copy
/// their parents unchanged.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PointCrossover {
  rate: f64,
}

impl PointCrossover {
  /// Creates the operator with given crossover probability.
  ///
  /// # Panics
  ///
  /// Panics if the rate lies outside `[0, 1]`.
  pub fn new(rate: f64) -> Self {
    assert!(
      (0.0..=1.0).contains(&rate),
      "crossover rate must lie in [0, 1]"
    );
    Self { rate }
  }
}

impl Crossover for PointCrossover {
  fn cross(
    &self,
    first: &[u8],
    second: &[u8],
    rng: &mut StdRng,
  ) -> (Genome, Genome) {
    let mut child1 = first.to_vec();
    let mut child2 = second.to_vec();
    if rng.gen::<f64>() <= self.rate {
      let split = rng.gen_range(0..first.len());
      child1[..split].copy_from_slice(&second[..split]);
      child2[..split].copy_from_slice(&first[..split]);
    }
    (child1, child2)
  }
}

/// Uniform crossover: with the configured probability every gene swaps
/// between the children with a chance of one half, otherwise the children
/// copy their parents unchanged.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct UniformCrossover {
  rate: f64,
}

impl UniformCrossover {
  /// Creates the operator with given crossover probability.
  ///
  /// # Panics
  ///
  /// Panics if the rate lies outside `[0, 1]`.
  pub fn new(rate: f64) -> Self {
    assert!(
      (0.0..=1.0).contains(&rate),
      "crossover rate must lie in [0, 1]"
    );
    Self { rate }
  }
}

impl Crossover for UniformCrossover {
  fn cross(
    &self,
    first: &[u8],
    second: &[u8],
    rng: &mut StdRng,
  ) -> (Genome, Genome) {
    let mut child1 = first.to_vec();
    let mut child2 = second.to_vec();
    if rng.gen::<f64>() <= self.rate {
      for gene in 0..first.len() {
        if rng.gen_range(0..2) == 1 {
          child1[gene] = second[gene];
          child2[gene] = first[gene];
        }
      }
    }
    (child1, child2)
  }
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;

  const FIRST: [u8; 6] = [0, 0, 0, 0, 0, 0];
  const SECOND: [u8; 6] = [1, 1, 1, 1, 1, 1];

  #[test]
  fn test_point_crossover_swaps_prefixes() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..20 {
      let (child1, child2) =
        PointCrossover::new(1.0).cross(&FIRST, &SECOND, &mut rng);
      // children complement each other around a single split
      let split = child1.iter().take_while(|gene| **gene == 1).count();
      assert!(child1[split..].iter().all(|gene| *gene == 0));
      assert_eq!(&child2[..split], &FIRST[..split]);
      assert!(child2[split..].iter().all(|gene| *gene == 1));
    }
  }

  #[test]
  fn test_zero_rate_copies_parents() {
    let mut rng = StdRng::seed_from_u64(1);
    let (child1, child2) =
      PointCrossover::new(0.0).cross(&FIRST, &SECOND, &mut rng);
    assert_eq!(child1, FIRST.to_vec());
    assert_eq!(child2, SECOND.to_vec());
    let (child1, child2) =
      UniformCrossover::new(0.0).cross(&FIRST, &SECOND, &mut rng);
    assert_eq!(child1, FIRST.to_vec());
    assert_eq!(child2, SECOND.to_vec());
  }

  #[test]
  fn test_uniform_crossover_swaps_genes_pairwise() {
    let mut rng = StdRng::seed_from_u64(2);
    let (child1, child2) =
      UniformCrossover::new(1.0).cross(&FIRST, &SECOND, &mut rng);
    // whatever was swapped, the pair still carries one 0 and one 1 per gene
    for (a, b) in child1.iter().zip(&child2) {
      assert_eq!(a + b, 1);
    }
  }

  #[test]
  fn test_crossover_is_reproducible() {
    let operator = UniformCrossover::new(0.5);
    let first =
      operator.cross(&FIRST, &SECOND, &mut StdRng::seed_from_u64(9));
    let second =
      operator.cross(&FIRST, &SECOND, &mut StdRng::seed_from_u64(9));
    assert_eq!(first, second);
  }
}
