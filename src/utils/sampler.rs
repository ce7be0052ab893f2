/*!
# Weighted Sampling

[`Sampler`] draws items from a fixed discrete distribution in O(1) per
draw after O(k) preprocessing, using the alias method of Walker (1974) in
the formulation of Vose (1991).

# Examples
```
use rewire::utils::Sampler;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let rng = &mut Pcg64Mcg::seed_from_u64(123);
let sampler = Sampler::new(vec!['a', 'b', 'c'], &[1.0, 1.0, 2.0]);

// 'c' carries half of the total weight
let draws = (0..1000).filter(|_| *sampler.sample(rng) == 'c').count();
assert!((350..650).contains(&draws));
```
*/

use rand::Rng;

/// Samples from a fixed discrete distribution over `items` via alias
/// tables.
///
/// Construction is O(k) for `k` items; each draw is O(1) (one uniform
/// index plus one biased coin). The distribution is immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct Sampler<T> {
    items: Vec<T>,
    alias: Vec<usize>,
    accept: Vec<f64>,
}

impl<T> Sampler<T> {
    /// Builds the alias tables for `items` with the given `weights`.
    ///
    /// Weights need not be normalized. Items with zero weight are never
    /// drawn.
    ///
    /// **Panics if `items` is empty, the lengths differ, or the total
    /// weight is not finite and positive.**
    pub fn new(items: Vec<T>, weights: &[f64]) -> Self {
        assert_eq!(items.len(), weights.len());
        assert!(!items.is_empty(), "cannot sample from an empty item set");

        let total: f64 = weights.iter().sum();
        assert!(
            total.is_finite() && total > 0.0,
            "total weight must be finite and positive"
        );

        let k = items.len();
        let mut accept: Vec<f64> = weights.iter().map(|w| w * k as f64 / total).collect();
        let mut alias = vec![0usize; k];

        let mut smaller = Vec::with_capacity(k);
        let mut larger = Vec::with_capacity(k);
        for (i, &a) in accept.iter().enumerate() {
            if a < 1.0 {
                smaller.push(i);
            } else {
                larger.push(i);
            }
        }

        while let (Some(small), Some(large)) = (smaller.pop(), larger.pop()) {
            alias[small] = large;
            accept[large] += accept[small] - 1.0;
            if accept[large] < 1.0 {
                smaller.push(large);
            } else {
                larger.push(large);
            }
        }

        // Entries left over in either worklist have acceptance 1 up to
        // rounding
        for i in smaller.into_iter().chain(larger) {
            accept[i] = 1.0;
        }

        Self {
            items,
            alias,
            accept,
        }
    }

    /// Draws one item according to the configured weights.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        let i = rng.random_range(0..self.items.len());
        if rng.random::<f64>() < self.accept[i] {
            &self.items[i]
        } else {
            &self.items[self.alias[i]]
        }
    }

    /// Number of items in the support (including zero-weight items).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sampler has no items. Never holds, as
    /// construction rejects empty item sets.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn uniform_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let sampler = Sampler::new((0..10usize).collect(), &[1.0; 10]);

        let mut counts = [0usize; 10];
        let trials = 100_000;
        for _ in 0..trials {
            counts[*sampler.sample(rng)] += 1;
        }

        let expected = trials / 10;
        for &c in &counts {
            assert!((expected * 8 / 10..=expected * 12 / 10).contains(&c), "{counts:?}");
        }
    }

    #[test]
    fn skewed_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let sampler = Sampler::new(vec![0usize, 1, 2], &[0.1, 0.2, 0.7]);

        let mut counts = [0usize; 3];
        let trials = 100_000;
        for _ in 0..trials {
            counts[*sampler.sample(rng)] += 1;
        }

        for (c, p) in counts.iter().zip([0.1, 0.2, 0.7]) {
            let expected = (trials as f64 * p) as usize;
            assert!((expected * 8 / 10..=expected * 12 / 10).contains(c), "{counts:?}");
        }
    }

    #[test]
    fn zero_weight_items_are_never_drawn() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let sampler = Sampler::new(vec![0usize, 1, 2, 3], &[1.0, 0.0, 3.0, 0.0]);

        for _ in 0..10_000 {
            let item = *sampler.sample(rng);
            assert!(item == 0 || item == 2);
        }
    }

    #[test]
    #[should_panic]
    fn all_zero_weights_are_rejected() {
        Sampler::new(vec![0usize, 1], &[0.0, 0.0]);
    }

    #[test]
    fn single_item() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let sampler = Sampler::new(vec![42usize], &[0.5]);
        for _ in 0..100 {
            assert_eq!(*sampler.sample(rng), 42);
        }
    }
}
