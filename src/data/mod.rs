//! Labeled training instances

use crate::error::{NetworkError, Result};

/// A feature vector paired with a one-hot label vector
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub attributes: Vec<f64>,
    pub labels: Vec<f64>,
}

impl Instance {
    pub fn new(attributes: Vec<f64>, labels: Vec<f64>) -> Self {
        Instance { attributes, labels }
    }

    /// Build an instance whose label vector is one-hot at `class`
    pub fn one_hot(attributes: Vec<f64>, class: usize, class_count: usize) -> Self {
        let labels = (0..class_count)
            .map(|i| if i == class { 1.0 } else { 0.0 })
            .collect();
        Instance { attributes, labels }
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_count(&self) -> usize {
        self.labels.len()
    }

    /// Index of the hot label (first one on ties)
    pub fn class_index(&self) -> usize {
        let mut best = 0;
        for (i, &label) in self.labels.iter().enumerate() {
            if label > self.labels[best] {
                best = i;
            }
        }
        best
    }
}

/// Returns `(attribute_count, class_count)` taken from the first instance,
/// checking that every other instance has the same shape
pub fn check_shape(instances: &[Instance]) -> Result<(usize, usize)> {
    let first = instances.first().ok_or(NetworkError::EmptyTrainingSet)?;
    let attribute_count = first.attribute_count();
    let class_count = first.class_count();

    for instance in &instances[1..] {
        if instance.attribute_count() != attribute_count {
            return Err(NetworkError::dimension(
                "instance attributes",
                attribute_count,
                instance.attribute_count(),
            ));
        }
        if instance.class_count() != class_count {
            return Err(NetworkError::dimension(
                "instance labels",
                class_count,
                instance.class_count(),
            ));
        }
    }

    Ok((attribute_count, class_count))
}
