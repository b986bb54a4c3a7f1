use rand::{rngs::StdRng, SeedableRng};
use soma::{bounds::Bounds, optimizer::tlbo::Tlbo};

fn main() {
  env_logger::init();

  // Bukin function N.6, minimum 0 at (-10, 1)
  let bukin = |x: &Vec<f64>| {
    100.0 * (x[1] - 0.01 * x[0] * x[0]).abs().sqrt()
      + 0.01 * (x[0] + 10.0).abs()
  };

  let tlbo = Tlbo::builder()
    .learners(40)
    .iterations(100)
    .bounds(Bounds::new(vec![-15.0, -3.0], vec![-5.0, 3.0]))
    .objective(bukin)
    .rng(StdRng::seed_from_u64(2024))
    .build();
  let (solved, history) = tlbo.run_with_history();

  println!(
    "best solution: ({:.4}, {:.4})",
    solved.solution[0], solved.solution[1]
  );
  println!("best cost:     {:.4}", solved.cost);
  println!("cost per iteration:");
  for (iteration, cost) in history.iter().enumerate() {
    println!("{:>4} {cost:.4}", iteration + 1);
  }
}
