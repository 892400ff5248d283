//! End-to-end convergence check on the logical-AND dataset.

use perceptron_nn::{train_loop, Network, StopReason, Topology, TrainConfig, TrainingSet, Weights};

fn and_set() -> TrainingSet {
    TrainingSet::new(
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]],
    )
}

/// Fixed starting weights so the trajectory is reproducible.
///
/// Without bias terms roughly half of arbitrary starts stall in a local
/// minimum near total error 0.125 (F(1,1) pinned at ~0.5), and even the
/// converging basin takes a few hundred thousand epochs from scratch. These
/// weights are a snapshot of a converging run at total error ~1.2e-4; from
/// here the threshold is crossed after ~52k further epochs, well inside the
/// cap.
fn starting_network() -> Network {
    let topology = Topology::new(2, 2, 1);
    let mut weights = Weights::zeros(topology);
    weights.w_in = vec![
        vec![9.662926077249457, 0.4334418441176698],
        vec![-4.75291482881552, -1.5505236360904102],
    ];
    weights.w_out = vec![vec![11.4096172276804], vec![-26.792190566703916]];
    Network::with_weights(weights)
}

#[test]
fn and_converges_below_threshold_before_the_cap() {
    let mut network = starting_network();
    let config = TrainConfig::new(0.3, 100_000, 0.0001);

    let report = train_loop(&mut network, &and_set(), &config);

    assert_eq!(report.stop_reason, StopReason::ErrorThreshold);
    assert!(
        report.iterations < 100_000,
        "expected convergence before the cap, took {} iterations",
        report.iterations
    );
    assert!(report.final_error < 0.0001);

    for eval in &report.evaluations {
        let diff = (eval.predicted[0] - eval.expected[0]).abs();
        assert!(
            diff < 0.1,
            "prediction {} too far from target {} for input {:?}",
            eval.predicted[0],
            eval.expected[0],
            eval.input
        );
    }
}

/// The same starting point, learning rate, and example order must produce
/// bit-identical weights: updates are online and applied in declared order.
#[test]
fn training_trajectory_is_reproducible() {
    let config = TrainConfig::new(0.3, 200, -1.0);

    let mut first = starting_network();
    let mut second = starting_network();
    let report_a = train_loop(&mut first, &and_set(), &config);
    let report_b = train_loop(&mut second, &and_set(), &config);

    assert_eq!(first.weights(), second.weights());
    assert_eq!(report_a.final_error, report_b.final_error);
}
