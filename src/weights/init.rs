use rand::Rng;

use crate::network::topology::Topology;
use crate::weights::store::Weights;

/// Fresh random weights, each element drawn uniformly from `[min, max)`.
pub fn randomize(topology: Topology, min: f64, max: f64) -> Weights {
    assert!(min < max, "random weight range [{}, {}) is empty", min, max);
    let mut rng = rand::thread_rng();

    let w_in = (0..topology.inputs)
        .map(|_| (0..topology.hidden).map(|_| rng.gen_range(min..max)).collect())
        .collect();
    let w_out = (0..topology.hidden)
        .map(|_| (0..topology.outputs).map(|_| rng.gen_range(min..max)).collect())
        .collect();

    Weights { topology, w_in, w_out }
}
