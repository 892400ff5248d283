/// Logistic sigmoid: 1/(1 + e^-x), squashing any finite input into (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid, σ'(x) = σ(x)(1 - σ(x)).
///
/// Takes the pre-activation value and evaluates the sigmoid exactly once.
pub fn sigmoid_prime(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}
