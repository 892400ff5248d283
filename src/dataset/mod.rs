pub mod sets;

pub use sets::{DatasetError, TrainingSet};
