use std::path::PathBuf;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `lambda`            : learning rate applied to every weight change
/// - `max_iterations`    : iteration cap; the loop stops after exactly this
///                         many epochs if the threshold was never reached
/// - `error_threshold`   : the loop stops once an epoch's total squared
///                         error falls below this value
/// - `autosave_interval` : completed epochs between weight checkpoints;
///                         0 disables autosaving
/// - `autosave_path`     : checkpoint destination; required for autosaving
///                         to take effect
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub lambda: f64,
    pub max_iterations: usize,
    pub error_threshold: f64,
    pub autosave_interval: usize,
    pub autosave_path: Option<PathBuf>,
}

impl TrainConfig {
    /// Creates a config with autosaving disabled.
    pub fn new(lambda: f64, max_iterations: usize, error_threshold: f64) -> TrainConfig {
        TrainConfig {
            lambda,
            max_iterations,
            error_threshold,
            autosave_interval: 0,
            autosave_path: None,
        }
    }

    /// Enables a weight checkpoint every `interval` completed epochs.
    pub fn with_autosave(mut self, interval: usize, path: PathBuf) -> TrainConfig {
        self.autosave_interval = interval;
        self.autosave_path = Some(path);
        self
    }
}
