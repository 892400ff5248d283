use crate::dataset::sets::TrainingSet;
use crate::network::network::Network;
use crate::train::report::{Evaluation, StopReason, TrainReport};
use crate::train::train_config::TrainConfig;
use crate::weights::store;

/// One full online pass over the training set, in declared order. Returns
/// the epoch's total squared error. Weight updates are applied per example,
/// so later examples in the same epoch already see earlier updates.
pub fn train_epoch(network: &mut Network, set: &TrainingSet, lambda: f64) -> f64 {
    let mut total_error = 0.0;
    for (input, target) in set.inputs.iter().zip(set.targets.iter()) {
        total_error += network.train_example(input, target, lambda);
    }
    total_error
}

/// Trains `network` until one of the two stopping conditions is met and
/// returns a report with the stop reason, iteration count, final error, a
/// no-update evaluation pass over the training set, and any autosave
/// failures.
///
/// Stopping conditions, checked after each completed epoch:
/// 1. the iteration count reached `config.max_iterations`, or
/// 2. the epoch's total squared error fell below `config.error_threshold`.
///
/// With `max_iterations == 0` no epoch runs at all and the report carries
/// `StopReason::MaxIterations` with zero iterations.
///
/// If `autosave_interval > 0` and a path is configured, the current weights
/// are persisted every `autosave_interval` completed epochs. A failed write
/// is recorded in the report and training continues; the in-memory weights
/// are never affected.
///
/// # Panics
/// Panics if the training set is empty or any example's dimensions disagree
/// with the network topology.
pub fn train_loop(network: &mut Network, set: &TrainingSet, config: &TrainConfig) -> TrainReport {
    assert!(!set.is_empty(), "training set must not be empty");

    let mut iterations = 0;
    let mut total_error = 0.0;
    let mut autosave_failures = Vec::new();

    let stop_reason = if config.max_iterations == 0 {
        StopReason::MaxIterations
    } else {
        loop {
            total_error = train_epoch(network, set, config.lambda);
            iterations += 1;

            if config.autosave_interval > 0 && iterations % config.autosave_interval == 0 {
                if let Some(path) = &config.autosave_path {
                    if let Err(e) = store::save(&network.weights(), path) {
                        autosave_failures.push((iterations, e.to_string()));
                    }
                }
            }

            if iterations >= config.max_iterations {
                break StopReason::MaxIterations;
            }
            if total_error < config.error_threshold {
                break StopReason::ErrorThreshold;
            }
        }
    };

    let evaluations = set
        .inputs
        .iter()
        .zip(set.targets.iter())
        .map(|(input, target)| Evaluation {
            input: input.clone(),
            expected: target.clone(),
            predicted: network.forward(input),
        })
        .collect();

    TrainReport {
        stop_reason,
        iterations,
        final_error: total_error,
        evaluations,
        autosave_failures,
    }
}
