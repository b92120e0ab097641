// This example trains a small multi layer perceptron on four samples
// using plain gradient descent, printing the loss as it goes.

// Run with RUST_LOG=debug to see optimizer steps being logged.

use scalargrad::{ loss::mse, Mlp, Module, ParameterFactory, optimize::{ Optimizer, SGD } };

fn main() -> scalargrad::Result<()> {
  env_logger::init();

  let mlp = Mlp::new(&[3, 4, 4, 1], &mut ParameterFactory::from_entropy())?;

  let xs = [
    [2.0, 3.0, -1.0],
    [3.0, -1.0, 0.5],
    [0.5, 1.0, 1.0],
    [1.0, 1.0, -1.0],
  ];
  let ys = ParameterFactory::values(&[1.0, -1.0, -1.0, 1.0]);

  let mut optimizer = Optimizer::new(0.5, SGD);

  for epoch in 0..50 {
    let predictions = xs.iter()
      .map(|x| mlp.predict(&ParameterFactory::values(x)) )
      .collect::<scalargrad::Result<Vec<_>>>()?;
    let loss = mse(&ys, &predictions)?;
    println!("{epoch:>3} {loss}");
    optimizer.minimize(&loss, &mlp.parameters());
  }

  for x in &xs {
    let y = mlp.predict(&ParameterFactory::values(x))?;
    println!("{x:?} -> {:.3}", y.data());
  }
  Ok(())
}
