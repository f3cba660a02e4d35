use alloc::collections::BTreeMap;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Seeded PRNG, the same seed always yields the same sequence.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: i64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed as u64),
        }
    }
}

impl UniformSource for SeededSource {
    fn below(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }
}

/// Shuffles all linear cell indices and mines the first `mine_count` of them.
///
/// Only the mined prefix is drawn. Positions touched by a swap are kept in a
/// sparse map, so the shuffle needs memory proportional to the mine count and
/// never materializes the full index list.
#[derive(Clone, Debug)]
pub struct ShuffleGenerator<S> {
    source: S,
}

impl<S: UniformSource> ShuffleGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl ShuffleGenerator<SeededSource> {
    pub fn seeded(seed: i64) -> Self {
        Self::new(SeededSource::new(seed))
    }
}

impl<S: UniformSource> LayoutGenerator for ShuffleGenerator<S> {
    fn generate(mut self, config: &Config) -> Result<MineLayout> {
        config.validate()?;

        let total = config.total_cells() as usize;
        let mines = config.mine_count as usize;
        let cols = usize::from(config.cols);

        // position -> index currently stored there, absent means untouched
        let mut swapped: BTreeMap<usize, usize> = BTreeMap::new();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for i in 0..mines {
            let j = i + self.source.below(total - i);
            let picked = swapped.get(&j).copied().unwrap_or(j);
            let displaced = swapped.remove(&i).unwrap_or(i);
            swapped.insert(j, displaced);
            mine_mask[[picked / cols, picked % cols]] = true;
        }

        log::debug!(
            "Placed {} mines on {}x{} board",
            mines,
            config.rows,
            config.cols
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Replays a fixed list of offsets, each clamped into range.
    struct Fixed {
        values: Vec<usize>,
        next: usize,
    }

    impl Fixed {
        fn new(values: &[usize]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl UniformSource for Fixed {
        fn below(&mut self, n: usize) -> usize {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value.min(n - 1)
        }
    }

    fn mined(layout: &MineLayout) -> Vec<Coord> {
        layout.iter_mines().collect()
    }

    #[test]
    fn zero_offsets_mine_leading_cells() {
        let config = Config::new(2, 2, 2, 0);

        let layout = ShuffleGenerator::new(Fixed::new(&[0])).generate(&config).unwrap();

        assert_eq!(mined(&layout), [Coord::new(0, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn swaps_follow_source_offsets() {
        let config = Config::new(2, 2, 2, 0);

        // [0,1,2,3] -> swap(0,3) -> [3,1,2,0] -> swap(1,3) -> [3,0,2,1]
        let layout = ShuffleGenerator::new(Fixed::new(&[usize::MAX])).generate(&config).unwrap();

        assert_eq!(mined(&layout), [Coord::new(0, 0), Coord::new(1, 1)]);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = Config::new(16, 30, 99, 7);

        let first = ShuffleGenerator::seeded(config.seed).generate(&config).unwrap();
        let second = ShuffleGenerator::seeded(config.seed).generate(&config).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.mine_count(), 99);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let config = Config::new(16, 16, 40, 1);
        let other = Config { seed: 2, ..config };

        let first = ShuffleGenerator::seeded(config.seed).generate(&config).unwrap();
        let second = ShuffleGenerator::seeded(other.seed).generate(&other).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn negative_seed_is_accepted() {
        let config = Config::new(8, 8, 10, -42);

        let layout = ShuffleGenerator::seeded(config.seed).generate(&config).unwrap();

        assert_eq!(layout.mine_count(), 10);
    }

    #[test]
    fn full_and_empty_boards() {
        let full = Config::new(3, 4, 12, 5);
        let empty = Config::new(3, 4, 0, 5);

        assert_eq!(ShuffleGenerator::seeded(5).generate(&full).unwrap().mine_count(), 12);
        assert_eq!(ShuffleGenerator::seeded(5).generate(&empty).unwrap().mine_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            ShuffleGenerator::seeded(0).generate(&Config::new(0, 4, 0, 0)),
            Err(BoardError::InvalidDimensions)
        );
        assert_eq!(
            ShuffleGenerator::seeded(0).generate(&Config::new(2, 2, 5, 0)),
            Err(BoardError::InvalidMineCount)
        );
    }

    #[test]
    fn sparse_swaps_match_full_shuffle() {
        let config = Config::new(4, 5, 9, 0);
        let offsets = [7, 0, 3, 12, 1, 1, 9, 4, 2];

        let total = config.total_cells() as usize;
        let mut indices: Vec<usize> = (0..total).collect();
        let mut source = Fixed::new(&offsets);
        for i in 0..config.mine_count as usize {
            let j = i + source.below(total - i);
            indices.swap(i, j);
        }
        let mut expected: Vec<Coord> = indices[..config.mine_count as usize]
            .iter()
            .map(|&index| Coord::new((index / 5) as Dim, (index % 5) as Dim))
            .collect();
        expected.sort();

        let layout = ShuffleGenerator::new(Fixed::new(&offsets))
            .generate(&config)
            .unwrap();

        assert_eq!(mined(&layout), expected);
    }

    #[test]
    fn nearly_full_boards_get_every_mine() {
        for seed in 0..50 {
            let config = Config::new(5, 5, 24, seed);

            let layout = ShuffleGenerator::seeded(seed).generate(&config).unwrap();

            assert_eq!(layout.mine_count(), 24, "seed {seed}");
        }
    }
}
