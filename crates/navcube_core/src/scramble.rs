use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Face, Move, Turn};

/// Returns a random sequence of `length` moves in which no two consecutive
/// moves turn a layer on the same axis.
///
/// The face is drawn uniformly and redrawn while its axis matches the
/// previous move's axis. The turn amount is drawn uniformly.
pub fn generate_scramble(length: usize, rng: &mut impl Rng) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let face = Face::ALL[rng.random_range(0..Face::ALL.len())];
        if moves.last().is_some_and(|last| last.face.axis() == face.axis()) {
            continue;
        }
        let turn = Turn::ALL[rng.random_range(0..Turn::ALL.len())];
        moves.push(Move::new(face, turn));
    }
    moves
}

/// Returns the sequence that undoes `moves`: reversed, with each move
/// inverted. Half turns are their own inverse.
pub fn invert(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.rev()).collect()
}

/// Scramble that was generated from a known seed and can be undone exactly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scramble {
    /// Seed for the random number generator.
    pub seed: u64,
    /// Moves, in the order they are applied.
    pub moves: Vec<Move>,
}
impl Scramble {
    /// Generates a new scramble from a random seed.
    pub fn new(length: usize) -> Self {
        Self::new_seeded(length, rand::rng().random())
    }

    /// Generates the scramble for a given seed. The same seed and length
    /// always produce the same moves.
    pub fn new_seeded(length: usize, seed: u64) -> Self {
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
        let moves = generate_scramble(length, &mut rng);
        log::debug!("generated scramble of length {length} from seed {seed}");
        Self { seed, moves }
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    /// Returns whether the scramble has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the sequence that undoes this scramble.
    pub fn solution(&self) -> Vec<Move> {
        invert(&self.moves)
    }
}
