use perceptron_nn::weights::init;
use perceptron_nn::{train_loop, Network, StopReason, Topology, TrainConfig, TrainingSet};

fn main() {
    let topology = Topology::new(2, 2, 1);
    let mut network = Network::with_weights(init::randomize(topology, -1.5, 1.5));

    let set = TrainingSet::new(
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]],
    );

    let config = TrainConfig::new(0.3, 100_000, 0.0001);
    let report = train_loop(&mut network, &set, &config);

    match report.stop_reason {
        StopReason::ErrorThreshold => println!(
            "Converged after {} iterations, total error {:.6}.",
            report.iterations, report.final_error
        ),
        StopReason::MaxIterations => println!(
            "Stopped at the iteration cap ({}), total error {:.6}.",
            report.iterations, report.final_error
        ),
    }

    for eval in &report.evaluations {
        println!(
            "Input: {:?} -> Output: {:.4} (target {:.0})",
            eval.input, eval.predicted[0], eval.expected[0]
        );
    }
}
