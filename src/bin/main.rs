use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relu_softmax_nn::{Instance, Trainer, TrainingConfig, visualization};

const SEED: u64 = 42;
const HIDDEN_COUNT: usize = 4;
const LEARNING_RATE: f64 = 0.1;
const MAX_EPOCH: usize = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // XOR with two one-hot classes
    let data = vec![
        Instance::one_hot(vec![0.0, 0.0], 0, 2),
        Instance::one_hot(vec![0.0, 1.0], 1, 2),
        Instance::one_hot(vec![1.0, 0.0], 1, 2),
        Instance::one_hot(vec![1.0, 1.0], 0, 2),
    ];
    let attribute_count = data[0].attribute_count();
    let class_count = data[0].class_count();

    // Initial weights come from their own stream so the shuffle seed stays independent
    let mut weight_rng = StdRng::seed_from_u64(SEED + 1);
    let hidden_weights = random_matrix(&mut weight_rng, HIDDEN_COUNT, attribute_count + 1);
    let output_weights = random_matrix(&mut weight_rng, class_count, HIDDEN_COUNT + 1);

    let config = TrainingConfig::new(LEARNING_RATE, MAX_EPOCH);
    let mut trainer = Trainer::new(
        data.clone(),
        HIDDEN_COUNT,
        config,
        StdRng::seed_from_u64(SEED),
        &hidden_weights,
        &output_weights,
    )?;

    println!("Initial weights:\n{}", visualization::render_weights(trainer.network()));

    let losses = trainer.train();
    println!("{}", visualization::render_loss_curve(&losses));

    println!("Final weights:\n{}", visualization::render_weights(trainer.network()));

    for instance in &data {
        let predicted = trainer.predict(instance)?;
        println!(
            "Input: {:?}, Expected: {}, Predicted: {}",
            instance.attributes,
            instance.class_index(),
            predicted
        );
    }
    println!("Accuracy: {:.2}", trainer.accuracy(&data)?);

    Ok(())
}

/// Uniform weights in [-1, 1)
fn random_matrix(rng: &mut impl Rng, rows: usize, cols: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect()
}
