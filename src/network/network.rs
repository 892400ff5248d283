use crate::math::sigmoid::{sigmoid, sigmoid_prime};
use crate::network::topology::Topology;
use crate::weights::store::Weights;

/// A fully-connected feedforward network with one hidden layer and sigmoid
/// activations everywhere.
///
/// The weight matrices are owned exclusively by the network and updated in
/// place, one training example at a time. The activation and pre-activation
/// vectors are owned-and-reused scratch space: every call to `forward`
/// overwrites them, and nothing outside the network aliases them.
#[derive(Debug, Clone)]
pub struct Network {
    pub topology: Topology,
    /// Input→hidden weights, `inputs × hidden`.
    pub w_in: Vec<Vec<f64>>,
    /// Hidden→output weights, `hidden × outputs`.
    pub w_out: Vec<Vec<f64>>,

    // Scratch buffers, overwritten on every forward pass.
    input: Vec<f64>,
    theta_hidden: Vec<f64>,
    hidden: Vec<f64>,
    theta_out: Vec<f64>,
    output: Vec<f64>,
}

impl Network {
    /// Builds a network with all weights at zero.
    pub fn new(topology: Topology) -> Network {
        Network {
            topology,
            w_in: vec![vec![0.0; topology.hidden]; topology.inputs],
            w_out: vec![vec![0.0; topology.outputs]; topology.hidden],
            input: vec![0.0; topology.inputs],
            theta_hidden: vec![0.0; topology.hidden],
            hidden: vec![0.0; topology.hidden],
            theta_out: vec![0.0; topology.outputs],
            output: vec![0.0; topology.outputs],
        }
    }

    /// Builds a network around an existing weight set.
    pub fn with_weights(weights: Weights) -> Network {
        let mut network = Network::new(weights.topology);
        network.set_weights(weights);
        network
    }

    /// Clones the current weights out as a detached `Weights` value.
    pub fn weights(&self) -> Weights {
        Weights {
            topology: self.topology,
            w_in: self.w_in.clone(),
            w_out: self.w_out.clone(),
        }
    }

    /// Replaces the weight matrices. The weight set's topology must match.
    pub fn set_weights(&mut self, weights: Weights) {
        assert_eq!(
            weights.topology, self.topology,
            "weight set topology {} does not match network topology {}",
            weights.topology, self.topology
        );
        self.w_in = weights.w_in;
        self.w_out = weights.w_out;
    }

    /// Forward propagation.
    ///
    /// Computes `theta_hidden[j] = Σ_k w_in[k][j]·a[k]`, `h[j] = σ(theta)`,
    /// then `theta_out[i] = Σ_j w_out[j][i]·h[j]`, `F[i] = σ(theta)`, and
    /// returns a copy of F. Deterministic given fixed weights and input;
    /// the only side effect is overwriting the scratch buffers.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.topology.inputs,
            "input length {} does not match topology {}",
            input.len(),
            self.topology
        );
        self.input.copy_from_slice(input);

        for j in 0..self.topology.hidden {
            let mut theta = 0.0;
            for k in 0..self.topology.inputs {
                theta += self.w_in[k][j] * self.input[k];
            }
            self.theta_hidden[j] = theta;
            self.hidden[j] = sigmoid(theta);
        }

        for i in 0..self.topology.outputs {
            let mut theta = 0.0;
            for j in 0..self.topology.hidden {
                theta += self.w_out[j][i] * self.hidden[j];
            }
            self.theta_out[i] = theta;
            self.output[i] = sigmoid(theta);
        }

        self.output.clone()
    }

    /// One online backpropagation step: forward pass, gradient computation,
    /// immediate weight update. Returns this example's contribution to the
    /// total error, `Σ_i 0.5·(T[i] - F[i])²`.
    ///
    /// Gradient terms follow the classic derivation:
    /// `ψ[i] = ω[i]·σ'(theta_out[i])` at the output,
    /// `Ψ[j] = (Σ_i ψ[i]·w_out[j][i])·σ'(theta_hidden[j])` at the hidden
    /// layer. Both delta sets are computed against the pre-update weights
    /// and then applied before the next example; callers that rely on
    /// reproducible trajectories depend on this ordering.
    pub fn train_example(&mut self, input: &[f64], target: &[f64], lambda: f64) -> f64 {
        assert_eq!(
            target.len(),
            self.topology.outputs,
            "target length {} does not match topology {}",
            target.len(),
            self.topology
        );
        self.forward(input);

        let mut example_error = 0.0;
        let mut psi = vec![0.0; self.topology.outputs];
        for i in 0..self.topology.outputs {
            let omega = target[i] - self.output[i];
            example_error += 0.5 * omega * omega;
            psi[i] = omega * sigmoid_prime(self.theta_out[i]);
        }

        // Hidden-layer signals must see the pre-update output weights.
        let mut psi_hidden = vec![0.0; self.topology.hidden];
        for j in 0..self.topology.hidden {
            let mut omega_hidden = 0.0;
            for i in 0..self.topology.outputs {
                omega_hidden += psi[i] * self.w_out[j][i];
            }
            psi_hidden[j] = omega_hidden * sigmoid_prime(self.theta_hidden[j]);
        }

        for j in 0..self.topology.hidden {
            for i in 0..self.topology.outputs {
                self.w_out[j][i] += lambda * psi[i] * self.hidden[j];
            }
        }
        for k in 0..self.topology.inputs {
            for j in 0..self.topology.hidden {
                self.w_in[k][j] += lambda * psi_hidden[j] * self.input[k];
            }
        }

        example_error
    }

    /// Run-only inference: forward propagation over each input, no gradient
    /// computation, no weight mutation. Returns one output vector per input.
    pub fn evaluate(&mut self, inputs: &[Vec<f64>]) -> Vec<Vec<f64>> {
        inputs.iter().map(|input| self.forward(input)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn fixed_221() -> Network {
        let mut network = Network::new(Topology::new(2, 2, 1));
        network.w_in = vec![vec![0.5, -0.4], vec![0.3, 0.8]];
        network.w_out = vec![vec![0.6], vec![-0.2]];
        network
    }

    #[test]
    fn forward_is_deterministic() {
        let mut network = fixed_221();
        let first = network.forward(&[0.7, 0.2]);
        let second = network.forward(&[0.7, 0.2]);
        assert_eq!(first, second);
    }

    #[test]
    fn forward_matches_hand_computation() {
        let mut network = fixed_221();
        let output = network.forward(&[1.0, 0.0]);

        let h0 = sigmoid(0.5);
        let h1 = sigmoid(-0.4);
        let expected = sigmoid(0.6 * h0 - 0.2 * h1);
        assert_abs_diff_eq!(output[0], expected, epsilon = 1e-15);
    }

    #[test]
    #[should_panic(expected = "input length")]
    fn forward_rejects_wrong_input_length() {
        fixed_221().forward(&[1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "target length")]
    fn train_example_rejects_wrong_target_length() {
        fixed_221().train_example(&[1.0, 0.0], &[1.0, 0.0], 0.3);
    }

    #[test]
    fn evaluate_does_not_mutate_weights() {
        let mut network = fixed_221();
        let before = network.weights();
        network.evaluate(&[vec![0.0, 0.0], vec![1.0, 1.0]]);
        assert_eq!(network.weights(), before);
    }

    /// Error of one example as a pure function of the network's weights.
    fn example_error(network: &mut Network, input: &[f64], target: &[f64]) -> f64 {
        let output = network.forward(input);
        output
            .iter()
            .zip(target.iter())
            .map(|(f, t)| 0.5 * (t - f) * (t - f))
            .sum()
    }

    /// With lambda = 1 the applied update equals the negative error gradient,
    /// so every weight delta must match the central finite difference of the
    /// example error within 1e-4.
    #[test]
    fn analytic_gradient_matches_finite_difference() {
        let input = [0.35, 0.9];
        let target = [0.5];
        let eps = 1e-6;

        let reference = fixed_221();
        let mut updated = reference.clone();
        updated.train_example(&input, &target, 1.0);

        for k in 0..2 {
            for j in 0..2 {
                let mut plus = reference.clone();
                plus.w_in[k][j] += eps;
                let mut minus = reference.clone();
                minus.w_in[k][j] -= eps;
                let numeric = (example_error(&mut plus, &input, &target)
                    - example_error(&mut minus, &input, &target))
                    / (2.0 * eps);

                let applied = updated.w_in[k][j] - reference.w_in[k][j];
                assert_abs_diff_eq!(applied, -numeric, epsilon = 1e-4);
            }
        }

        for j in 0..2 {
            let mut plus = reference.clone();
            plus.w_out[j][0] += eps;
            let mut minus = reference.clone();
            minus.w_out[j][0] -= eps;
            let numeric = (example_error(&mut plus, &input, &target)
                - example_error(&mut minus, &input, &target))
                / (2.0 * eps);

            let applied = updated.w_out[j][0] - reference.w_out[j][0];
            assert_abs_diff_eq!(applied, -numeric, epsilon = 1e-4);
        }
    }
}
