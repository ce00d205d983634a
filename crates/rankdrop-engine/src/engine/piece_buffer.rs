use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies pieces using the 7-bag randomizer.
///
/// Every run of seven pieces drawn from a bag boundary contains each kind
/// exactly once, in shuffled order. The queue always holds more than one bag so
/// upcoming pieces can be previewed.
///
/// # Example
///
/// ```
/// use rankdrop_engine::{PieceBuffer, PieceKind};
///
/// let mut buffer = PieceBuffer::new();
/// let mut first_bag: Vec<PieceKind> = (0..7).map(|_| buffer.pop_next()).collect();
/// first_bag.sort_by_key(|kind| kind.as_char());
/// assert_eq!(first_bag.len(), 7);
/// first_bag.dedup();
/// assert_eq!(first_bag.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    rng: Pcg32,
    bag: VecDeque<PieceKind>,
}

impl Default for PieceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// 128-bit seed for deterministic piece generation.
///
/// Written as 32 hexadecimal digits, both by [`Display`](fmt::Display) and in
/// serialized form.
///
/// ```
/// use rankdrop_engine::PieceSeed;
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    const HEX_LEN: usize = 32;
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected {} hexadecimal digits", PieceSeed::HEX_LEN)]
pub struct ParsePieceSeedError {
    input: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != Self::HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows `rng.random::<PieceSeed>()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceBuffer {
    /// Creates a buffer seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a buffer whose piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            bag: VecDeque::with_capacity(PieceKind::LEN * 2),
        };
        this.fill_bag();
        this
    }

    // Keeps at least one full bag queued behind the next piece.
    fn fill_bag(&mut self) {
        while self.bag.len() <= PieceKind::LEN {
            let mut new_bag = PieceKind::ALL;
            new_bag.shuffle(&mut self.rng);
            self.bag.extend(new_bag);
        }
    }

    /// Draws the next piece.
    ///
    /// # Panics
    ///
    /// Never in practice: the queue is refilled before every draw.
    pub fn pop_next(&mut self) -> PieceKind {
        self.fill_bag();
        self.bag.pop_front().expect("piece bag is refilled before drawing")
    }

    /// Upcoming pieces, next first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag.iter().copied()
    }
}
