use rand::{rngs::StdRng, SeedableRng};
use soma::{
  bounds::Bounds,
  optimizer::{de::De, Optimizer},
};

fn main() {
  env_logger::init();

  // Bukin function N.6, minimum 0 at (-10, 1)
  let bukin = |x: &Vec<f64>| {
    100.0 * (x[1] - 0.01 * x[0] * x[0]).abs().sqrt()
      + 0.01 * (x[0] + 10.0).abs()
  };

  let de = De::builder()
    .population_size(30)
    .generations(40)
    .mutation_rate(0.5)
    .bounds(Bounds::new(vec![-15.0, -3.0], vec![-5.0, 3.0]))
    .objective(bukin)
    .rng(StdRng::seed_from_u64(2024))
    .build();
  let solved = de.run();

  println!(
    "best solution: ({:.4}, {:.4})",
    solved.solution[0], solved.solution[1]
  );
  println!("best cost:     {:.4}", solved.cost);
}
