/// Which stopping condition ended a `train_loop` run. The two reasons are
/// reported distinctly; when both hold after the same epoch the iteration
/// cap wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured iteration cap was reached.
    MaxIterations,
    /// An epoch's total squared error fell below the configured threshold.
    ErrorThreshold,
}

/// One (input, expected, predicted) triple from the post-training
/// diagnostic pass over the training set.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
    pub predicted: Vec<f64>,
}

/// Outcome of a `train_loop` run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub stop_reason: StopReason,
    /// Completed epochs.
    pub iterations: usize,
    /// Total squared error of the last completed epoch.
    pub final_error: f64,
    /// Final-weights pass over every training example, no updates applied.
    pub evaluations: Vec<Evaluation>,
    /// (iteration, error message) for each checkpoint that failed to write.
    /// Autosave failures never abort training.
    pub autosave_failures: Vec<(usize, String)>,
}
