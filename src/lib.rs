pub mod config;
pub mod console;
pub mod dataset;
pub mod math;
pub mod network;
pub mod train;
pub mod weights;

// Convenience re-exports
pub use config::run_config::RunConfig;
pub use dataset::sets::TrainingSet;
pub use network::network::Network;
pub use network::topology::Topology;
pub use train::loop_fn::{train_epoch, train_loop};
pub use train::report::{StopReason, TrainReport};
pub use train::train_config::TrainConfig;
pub use weights::store::Weights;
