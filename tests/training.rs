use scalargrad::{
  loss::mse,
  optimize::{ Optimizer, SGD },
  Mlp, Module, ParameterFactory, Value,
};

fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

fn dataset() -> (Vec<Vec<Value>>, Vec<Value>) {
  let xs = [
    [2.0, 3.0, -1.0],
    [3.0, -1.0, 0.5],
    [0.5, 1.0, 1.0],
    [1.0, 1.0, -1.0],
  ];
  let inputs = xs.iter().map(|x| ParameterFactory::values(x) ).collect();
  (inputs, ParameterFactory::values(&[1.0, -1.0, -1.0, 1.0]))
}

fn loss(mlp: &Mlp, inputs: &[Vec<Value>], targets: &[Value]) -> Value {
  let predictions: Vec<Value> = inputs.iter()
    .map(|x| mlp.predict(x).unwrap() )
    .collect();
  mse(targets, &predictions).unwrap()
}

#[test]
fn expression_gradients() {
  init_logger();
  let x = Value::named(1.0, "x");
  let x1 = x.add(1.0);
  let y = Value::named(3.0, "y");
  let b = Value::named(1.0, "b");
  let xy = x1.mul(&y);
  let z = xy.add(&b);
  z.set_label("z");

  z.set_grad(1.0);
  z.backward();

  assert_eq!(z.grad(), 1.0);
  assert_eq!(b.grad(), 1.0);
  assert_eq!(xy.grad(), 1.0);
  assert_eq!(x.grad(), 3.0);
  assert_eq!(y.grad(), 2.0);
}

#[test]
fn training_improves_loss() {
  init_logger();
  let mlp = Mlp::new(&[3, 4, 4, 1], &mut ParameterFactory::seeded(42)).unwrap();
  let (inputs, targets) = dataset();
  let mut optimizer = Optimizer::new(0.5, SGD);

  let initial = loss(&mlp, &inputs, &targets).data();
  for _ in 0..20 {
    let loss = loss(&mlp, &inputs, &targets);
    optimizer.minimize(&loss, &mlp.parameters());
  }
  let last = loss(&mlp, &inputs, &targets).data();

  assert_eq!(optimizer.steps(), 20);
  assert!(last < initial, "loss went from {initial} to {last}");
}

#[test]
fn manual_gradient_descent() {
  init_logger();
  let mlp = Mlp::new(&[3, 4, 4, 1], &mut ParameterFactory::seeded(7)).unwrap();
  let (inputs, targets) = dataset();
  let learning_rate = 0.5;

  let initial = loss(&mlp, &inputs, &targets).data();
  for _ in 0..20 {
    let loss = loss(&mlp, &inputs, &targets);
    mlp.zero_grad();
    loss.backward();
    for param in mlp.parameters() {
      param.set_data(param.data() - learning_rate * param.grad());
    }
  }
  assert!(loss(&mlp, &inputs, &targets).data() < initial);
}

#[test]
fn restored_network_predicts_identically() {
  init_logger();
  let mlp = Mlp::new(&[3, 4, 1], &mut ParameterFactory::seeded(3)).unwrap();
  let copy = Mlp::<f64>::from_bytes(&mlp.to_bytes().unwrap()).unwrap();
  let (inputs, _) = dataset();
  for x in &inputs {
    assert_eq!(mlp.predict(x).unwrap().data(), copy.predict(x).unwrap().data());
  }
}
