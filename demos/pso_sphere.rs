use rand::{rngs::StdRng, SeedableRng};
use soma::{
  bounds::Bounds,
  operator::ParBatch,
  optimizer::{pso::Pso, Optimizer},
};

fn main() {
  env_logger::init();

  // the sphere function, minimum 0 at the origin
  let sphere = |x: &Vec<f64>| x.iter().map(|v| v * v).sum::<f64>();

  let pso = Pso::builder()
    .particles(30)
    .iterations(50)
    .bounds(Bounds::uniform(5, -5.0, 5.0))
    // evaluated concurrently for each batch of particles
    .objective(sphere.par_batch())
    .rng(StdRng::seed_from_u64(2024))
    .build();
  let solved = pso.run();

  println!("best solution: {:?}", solved.solution);
  println!("best cost:     {:.6}", solved.cost);
}
