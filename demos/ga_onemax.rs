use rand::{rngs::StdRng, SeedableRng};
use soma::{
  crossover::PointCrossover,
  mutation::BitFlipMutation,
  optimizer::{ga::Ga, Optimizer},
  selection::RouletteSelection,
};

fn main() {
  env_logger::init();

  // minimize the number of zeros: the all-ones genome is optimal
  let zeros =
    |genome: &Vec<u8>| genome.iter().filter(|gene| **gene == 0).count() as f64;

  let ga = Ga::builder()
    .population_size(30)
    .genes(24)
    .generations(60)
    .objective(zeros)
    .selection(RouletteSelection())
    .crossover(PointCrossover::new(0.8))
    .mutation(BitFlipMutation::new(0.02))
    .rng(StdRng::seed_from_u64(2024))
    .build();
  let solved = ga.run();

  println!("best genome: {:?}", solved.solution);
  println!("zeros left:  {}", solved.cost);
}
