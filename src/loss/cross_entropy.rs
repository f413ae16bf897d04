use super::Loss;

/// Cross entropy loss over softmax outputs
pub struct CrossEntropyLoss;

impl Loss for CrossEntropyLoss {
    /// `-Σ t_i ln(p_i)`.
    ///
    /// Outputs are not clamped: an output of exactly 0.0 under a non-zero
    /// target gives an infinite loss, and under a zero target gives NaN.
    fn forward(outputs: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(outputs.len(), targets.len(), "Outputs and targets must have same length");

        let mut loss = 0.0;
        for (&p, &t) in outputs.iter().zip(targets) {
            loss -= t * p.ln();
        }
        loss
    }

    /// `t_i - p_i`, the gradient with respect to the pre-softmax sum when
    /// paired with a softmax output layer (sign chosen for `w += lr·δ·x`)
    fn delta(outputs: &[f64], targets: &[f64]) -> Vec<f64> {
        assert_eq!(outputs.len(), targets.len(), "Outputs and targets must have same length");

        outputs.iter().zip(targets).map(|(&p, &t)| t - p).collect()
    }
}
