//! Active-variable selection per output.

use jacgen_ir::ActiveSet;

use crate::error::SynthResult;
use crate::rng::SeedStream;

/// `max(1, floor(input_dim × density))`.
pub fn active_count(input_dim: usize, density: f64) -> usize {
    ((input_dim as f64 * density).floor() as usize).max(1)
}

/// Picks which inputs an output may depend on.
///
/// Each call draws independently, so outputs may share or avoid inputs;
/// overall sparsity is probabilistic rather than structurally minimal.
pub struct ActiveVariableSelector;

impl ActiveVariableSelector {
    /// Draw `active_count(input_dim, density)` distinct indices from
    /// `0..input_dim`.
    pub fn select(
        stream: &mut SeedStream,
        input_dim: usize,
        density: f64,
    ) -> SynthResult<ActiveSet> {
        let count = active_count(input_dim, density);
        let indices = stream.sample_indices(input_dim, count)?;
        tracing::debug!(input_dim, count, ?indices, "selected active variables");
        Ok(ActiveSet::new(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    #[test]
    fn count_floors_and_clamps() {
        assert_eq!(active_count(10, 1.0), 10);
        assert_eq!(active_count(10, 0.35), 3);
        assert_eq!(active_count(3, 0.1), 1);
        assert_eq!(active_count(1, 0.5), 1);
    }

    #[test]
    fn full_density_covers_every_input() {
        let mut s = SeedStream::new(42);
        let set = ActiveVariableSelector::select(&mut s, 6, 1.0).unwrap();
        assert_eq!(set.sorted(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn partial_density_draws_distinct_indices() {
        let mut s = SeedStream::new(42);
        let set = ActiveVariableSelector::select(&mut s, 10, 0.4).unwrap();
        assert_eq!(set.len(), 4);
        let sorted = set.sorted();
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        assert!(sorted.iter().all(|&i| i < 10));
    }

    #[test]
    fn wide_sparse_inputs_draw_only_the_active_count() {
        let mut s = SeedStream::new(42);
        for _ in 0..20 {
            let set = ActiveVariableSelector::select(&mut s, 20_000_000, 1.25e-7).unwrap();
            assert_eq!(set.len(), 2);
            assert!(set.indices().iter().all(|&i| i < 20_000_000));
        }
    }

    #[test]
    fn empty_input_is_a_precondition_error() {
        let mut s = SeedStream::new(42);
        let err = ActiveVariableSelector::select(&mut s, 0, 1.0).unwrap_err();
        assert!(matches!(err, SynthError::SampleTooLarge { requested: 1, available: 0 }));
    }
}
