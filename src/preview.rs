//! Bounded random preview over a dataset index.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::error::DatafoldError;
use crate::index::{DatasetIndex, Sample};
use crate::transform::Transform;

/// Draw `count` samples uniformly at random, with replacement.
///
/// Positions are drawn independently, so duplicates are permitted; the
/// samples come back in draw order. Seeded draws are reproducible, unseeded
/// draws use the thread-local generator. An empty index is an error.
pub fn preview(
    index: &DatasetIndex,
    count: usize,
    transform: &dyn Transform,
    seed: Option<u64>,
) -> Result<Vec<Sample>, DatafoldError> {
    if index.is_empty() {
        return Err(DatafoldError::EmptyIndex {
            root: index.root().to_path_buf(),
        });
    }

    let positions = if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        draw_positions(&mut rng, index.len(), count)
    } else {
        let mut rng = rand::rng();
        draw_positions(&mut rng, index.len(), count)
    };

    positions
        .into_iter()
        .map(|position| index.get(position, transform))
        .collect()
}

fn draw_positions<R: Rng + ?Sized>(rng: &mut R, len: usize, count: usize) -> Vec<usize> {
    (0..count).map(|_| rng.random_range(0..len)).collect()
}
