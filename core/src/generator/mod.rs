use crate::*;
pub use bag::*;
pub use random::*;

mod bag;
mod random;

/// A freshly dealt board and the letters left over for swaps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub board: Board,
    pub swap_pool: SwapPool,
}

pub trait BoardGenerator {
    fn generate(self, shape: BoardShape) -> Deal;
}

/// Deals tiles out of a letter bag using a caller-owned random source.
///
/// The source is borrowed so the same stream can go on to drive swaps after
/// the board is dealt.
#[derive(Debug)]
pub struct BagGenerator<'r, R> {
    bag: &'r LetterBag,
    rng: &'r mut R,
    pool_floor: usize,
}

impl<'r, R: RandomSource> BagGenerator<'r, R> {
    pub fn new(bag: &'r LetterBag, rng: &'r mut R, pool_floor: usize) -> Self {
        Self {
            bag,
            rng,
            pool_floor,
        }
    }
}

impl<R: RandomSource> BoardGenerator for BagGenerator<'_, R> {
    fn generate(self, shape: BoardShape) -> Deal {
        let mut remaining = self.bag.letters().to_vec();
        self.rng.shuffle(&mut remaining);

        let mut exhausted = false;
        let layers = shape
            .layers()
            .into_iter()
            .zip(0..)
            .map(|(spec, z)| {
                let tiles = spec
                    .anchors(z)
                    .map(|anchor| {
                        let letter = if remaining.is_empty() {
                            exhausted = true;
                            Letter::WILDCARD
                        } else {
                            let index = self.rng.pick_index(remaining.len());
                            remaining.remove(index)
                        };
                        Tile::new(anchor, letter)
                    })
                    .collect();
                Layer::new(spec, tiles)
            })
            .collect();
        if exhausted {
            log::warn!(
                "Letter bag of {} ran out while dealing, filled with wildcards",
                self.bag.len()
            );
        }

        // topping up reuses the unshuffled bag so it never touches the random stream
        if remaining.len() < self.pool_floor {
            let missing = self.pool_floor - remaining.len();
            log::warn!(
                "Only {} letters left for swaps, adding {} from the original bag",
                remaining.len(),
                missing
            );
            remaining.extend(self.bag.letters().iter().take(missing));
        }

        let board = Board::from_layers(layers, shape.all_visible());
        log::debug!(
            "Dealt {:?} board with {} tiles, {} letters left for swaps",
            shape,
            board.tile_count(),
            remaining.len()
        );
        Deal {
            board,
            swap_pool: SwapPool::new(remaining),
        }
    }
}

/// Values a [`BagGenerator`] draws from its source to deal `shape` out of a
/// bag of `bag_len` letters: one per shuffled position, then one per tile
/// taken from the bag.
pub fn deal_calls(bag_len: usize, shape: BoardShape) -> u64 {
    let shuffled = bag_len.saturating_sub(1);
    let picked = shape.tile_count().min(bag_len);
    u64::try_from(shuffled.saturating_add(picked)).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(seed: u32, shape: BoardShape) -> (Deal, SeededRandom) {
        let bag = LetterBag::standard();
        let mut rng = SeededRandom::new(seed);
        let deal = BagGenerator::new(&bag, &mut rng, 20).generate(shape);
        (deal, rng)
    }

    #[test]
    fn deal_calls_counts_generator_draws() {
        for shape in [BoardShape::Main, BoardShape::Mini, BoardShape::Pyramid] {
            let (_, rng) = deal(31, shape);
            assert_eq!(rng.calls(), deal_calls(LetterBag::standard().len(), shape));
        }
        assert_eq!(deal_calls(100, BoardShape::Main), 128);
        assert_eq!(deal_calls(10, BoardShape::Main), 19);
        assert_eq!(deal_calls(0, BoardShape::Mini), 0);
        assert!(deal_calls(usize::MAX, BoardShape::Main) >= u64::from(u32::MAX));
    }

    #[test]
    fn same_seed_deals_identical_boards_and_pools() {
        let (a, _) = deal(20250101, BoardShape::Main);
        let (b, _) = deal(20250101, BoardShape::Main);

        assert_eq!(a, b);
        assert_eq!(a.swap_pool.letters(), b.swap_pool.letters());
    }

    #[test]
    fn different_seeds_deal_different_boards() {
        let (a, _) = deal(1, BoardShape::Main);
        let (b, _) = deal(2, BoardShape::Main);
        assert_ne!(a.board, b.board);
    }

    #[test]
    fn main_deal_uses_all_letters_exactly_once() {
        let (deal, _) = deal(77, BoardShape::Main);

        assert_eq!(deal.board.tile_count(), 29);
        assert_eq!(deal.swap_pool.len(), 71);

        let mut dealt: Vec<Letter> = deal.board.tiles().map(Tile::letter).collect();
        dealt.extend_from_slice(deal.swap_pool.letters());
        dealt.sort();
        let mut bag = LetterBag::standard().letters().to_vec();
        bag.sort();
        assert_eq!(dealt, bag);
    }

    #[test]
    fn random_calls_are_shuffle_plus_one_per_tile() {
        let (_, rng) = deal(5, BoardShape::Main);
        assert_eq!(rng.calls(), 99 + 29);

        let (_, rng) = deal(5, BoardShape::Mini);
        assert_eq!(rng.calls(), 99 + 22);
    }

    #[test]
    fn empty_bag_deals_wildcards_and_keeps_empty_pool() {
        let bag = LetterBag::from_letters(Vec::new());
        let mut rng = SeededRandom::new(3);
        let deal = BagGenerator::new(&bag, &mut rng, 20).generate(BoardShape::Main);

        assert!(deal.board.tiles().all(|tile| tile.letter().is_wildcard()));
        assert!(deal.swap_pool.is_empty());
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn small_bag_tops_pool_up_from_original_order() {
        let bag = LetterBag::parse("ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEF").unwrap();
        let mut rng = SeededRandom::new(11);
        let deal = BagGenerator::new(&bag, &mut rng, 20).generate(BoardShape::Main);

        // 32 letters, 29 dealt, 3 left, 17 more from the front of the bag
        assert_eq!(deal.swap_pool.len(), 20);
        let topped_up: String = deal.swap_pool.letters()[3..].iter().map(|l| l.as_char()).collect();
        assert_eq!(topped_up, "ABCDEFGHIJKLMNOPQ");
        assert_eq!(rng.calls(), 31 + 29);
    }

    #[test]
    fn tiles_cover_their_parents_on_layer_above() {
        let (deal, _) = deal(9, BoardShape::Main);
        for tile in deal.board.tiles().filter(|tile| tile.layer() > 0) {
            let covering = tile.covering_coords().unwrap();
            assert!(covering.iter().all(|coord| coord.z == tile.layer() - 1));
            assert_eq!(covering[0].x, tile.id().x);
            assert_eq!(covering[0].y, tile.id().y);
        }
    }
}
