pub mod loop_fn;
pub mod report;
pub mod train_config;

pub use loop_fn::{train_epoch, train_loop};
pub use report::{Evaluation, StopReason, TrainReport};
pub use train_config::TrainConfig;
