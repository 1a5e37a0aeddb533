use std::{iter::Copied, slice::Iter};

/// Plain wrapper around `Vec<f64>` holding strain peaks or per-object
/// strains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrainsVec {
    inner: Vec<f64>,
}

impl StrainsVec {
    /// Constructs a new, empty [`StrainsVec`] with at least the specified
    /// capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn push(&mut self, value: f64) {
        self.inner.push(value);
    }

    /// Sorts the entries in descending order.
    pub fn sort_desc(&mut self) {
        self.inner.sort_by(|a, b| b.total_cmp(a));
    }

    /// Removes all zero entries.
    pub fn retain_non_zero(&mut self) {
        self.inner.retain(|&a| a > 0.0);
    }

    /// Removes all zeros and sorts the remaining entries in descending order.
    pub fn retain_non_zero_and_sort(&mut self) {
        self.retain_non_zero();
        self.sort_desc();
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.inner
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.inner
    }

    pub fn sum(&self) -> f64 {
        self.inner.iter().copied().sum()
    }

    pub fn iter(&self) -> Copied<Iter<'_, f64>> {
        self.inner.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.inner
    }
}

impl From<Vec<f64>> for StrainsVec {
    fn from(inner: Vec<f64>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::util::float_ext::FloatExt;

    use super::*;

    proptest! {
        #[test]
        fn retain_and_sort(values in prop::collection::vec(prop::option::of(0.0..1_000.0), 0..1_000)) {
            let mut vec = StrainsVec::with_capacity(values.len());
            let mut sum = 0.0;

            for opt in values.iter().copied() {
                let value = opt.unwrap_or(0.0);
                vec.push(value);
                sum += value;
            }

            assert_eq!(vec.len(), values.len());
            assert!(vec.sum().eq(sum));

            let mut expected: Vec<f64> = values.into_iter().flatten().filter(|&v| v > 0.0).collect();
            expected.sort_by(|a, b| b.total_cmp(a));

            vec.retain_non_zero_and_sort();

            assert!(vec.iter().eq(expected.into_iter()));
        }
    }
}
