use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::game_board::GamePiece;

/// A tetromino in a specific orientation.
///
/// Pieces are immutable values; rotating returns a new `Piece`. Rotation 0 is
/// the spawn orientation and each step turns the piece 90° counter-clockwise.
/// Orientations that look identical are not repeated, so the O piece has a
/// single rotation and the I, S and Z pieces have two.
///
/// # Example
///
/// ```
/// use rankdrop_engine::{GamePiece, Piece, PieceKind};
///
/// let stick = Piece::new(PieceKind::I);
/// assert_eq!((stick.width(), stick.height()), (1, 4));
///
/// let flat = stick.next_rotation();
/// assert_eq!((flat.width(), flat.height()), (4, 1));
/// assert_eq!(flat.next_rotation(), stick);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation" (e.g., "S#1")
        let s = format!("{}#{}", self.kind.as_char(), self.rotation.0);
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (kind_str, rotation_str) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!("expected format 'kind#rotation', got '{s}'"))
        })?;

        let kind = kind_str
            .parse::<PieceKind>()
            .map_err(serde::de::Error::custom)?;

        let rotation = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if usize::from(rotation) >= kind.num_rotations() {
            return Err(serde::de::Error::custom(format!(
                "rotation of {} must be below {}, got {rotation}",
                kind.as_char(),
                kind.num_rotations()
            )));
        }

        Ok(Piece {
            kind,
            rotation: PieceRotation(rotation),
        })
    }
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: PieceRotation::default(),
        }
    }

    /// Creates a piece in the given orientation, wrapping `rotation` around the
    /// number of distinct orientations of `kind`.
    #[must_use]
    pub fn with_rotation(kind: PieceKind, rotation: usize) -> Self {
        Self::new(kind).nth_rotation(rotation)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation.as_usize()
    }

    /// Occupied cells as `(dx, dy)` offsets from the bottom-left corner of the
    /// piece's bounding box.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        PIECE_SHAPES[self.kind as usize][self.rotation.as_usize()]
            .into_iter()
            .map(|(dx, dy)| (usize::from(dx), usize::from(dy)))
    }

    /// Lowest occupied `dy` for each column of the bounding box.
    #[must_use]
    pub fn skirt(&self) -> ArrayVec<usize, 4> {
        let mut skirt = ArrayVec::new();
        for dx in 0..self.width() {
            let lowest = self
                .cells()
                .filter(|&(x, _)| x == dx)
                .map(|(_, y)| y)
                .min()
                .unwrap_or(0);
            skirt.push(lowest);
        }
        skirt
    }
}

impl GamePiece for Piece {
    fn width(&self) -> usize {
        self.cells().map(|(x, _)| x + 1).max().unwrap_or(0)
    }

    fn height(&self) -> usize {
        self.cells().map(|(_, y)| y + 1).max().unwrap_or(0)
    }

    fn num_rotations(&self) -> usize {
        self.kind.num_rotations()
    }

    fn next_rotation(&self) -> Self {
        self.nth_rotation(1)
    }

    #[expect(clippy::cast_possible_truncation)]
    fn nth_rotation(&self, n: usize) -> Self {
        let count = self.kind.num_rotations();
        let rotation = (self.rotation.as_usize() + n % count) % count;
        Self {
            kind: self.kind,
            rotation: PieceRotation(rotation as u8),
        }
    }
}

/// Rotation state of a piece: the number of counter-clockwise quarter turns
/// from the spawn orientation, always below the kind's rotation count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece (the stick). Vertical in its spawn orientation.
    I = 0,
    /// O-piece (the square).
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Number of visually distinct orientations.
    #[must_use]
    pub const fn num_rotations(self) -> usize {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::J | PieceKind::L | PieceKind::T => 4,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use rankdrop_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use rankdrop_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind {input:?}, expected one of I, O, S, Z, J, L, T")]
pub struct ParsePieceKindError {
    input: String,
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c.to_ascii_uppercase()),
            _ => None,
        };
        kind.ok_or_else(|| ParsePieceKindError {
            input: s.to_owned(),
        })
    }
}

/// Cells of a piece as `(dx, dy)` offsets, with `dy` pointing up.
type PieceShape = [(u8, u8); 4];

/// Rotates a shape 90° counter-clockwise and moves it back to the origin.
const fn rotate_left(shape: PieceShape) -> PieceShape {
    let mut max_y = 0;
    let mut i = 0;
    while i < 4 {
        if shape[i].1 > max_y {
            max_y = shape[i].1;
        }
        i += 1;
    }
    let mut rotated = shape;
    let mut i = 0;
    while i < 4 {
        let (x, y) = shape[i];
        rotated[i] = (max_y - y, x);
        i += 1;
    }
    rotated
}

/// Generates all 4 rotation states of a piece shape.
///
/// Kinds with fewer distinct orientations only ever index the leading entries.
const fn shape_rotations(shape: PieceShape) -> [PieceShape; 4] {
    let mut rotates = [shape; 4];
    let mut i = 1;
    while i < 4 {
        rotates[i] = rotate_left(rotates[i - 1]);
        i += 1;
    }
    rotates
}

const PIECE_SHAPES: [[PieceShape; 4]; PieceKind::LEN] = [
    // I-piece
    shape_rotations([(0, 0), (0, 1), (0, 2), (0, 3)]),
    // O-piece
    shape_rotations([(0, 0), (0, 1), (1, 0), (1, 1)]),
    // S-piece
    shape_rotations([(0, 0), (1, 0), (1, 1), (2, 1)]),
    // Z-piece
    shape_rotations([(0, 1), (1, 1), (1, 0), (2, 0)]),
    // J-piece
    shape_rotations([(0, 0), (1, 0), (1, 1), (1, 2)]),
    // L-piece
    shape_rotations([(0, 0), (0, 1), (0, 2), (1, 0)]),
    // T-piece
    shape_rotations([(0, 0), (1, 0), (1, 1), (2, 0)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn orientations(kind: PieceKind) -> Vec<Piece> {
        let piece = Piece::new(kind);
        (0..piece.num_rotations())
            .map(|n| piece.nth_rotation(n))
            .collect()
    }

    fn sorted_cells(piece: Piece) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = piece.cells().collect();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_stick_orientations() {
        let stick = Piece::new(PieceKind::I);
        assert_eq!(stick.num_rotations(), 2);
        assert_eq!((stick.width(), stick.height()), (1, 4));

        let flat = stick.next_rotation();
        assert_eq!((flat.width(), flat.height()), (4, 1));
        assert_eq!(sorted_cells(flat), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(flat.skirt().as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_rotation_wraps_around() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            let n = piece.num_rotations();
            assert_eq!(piece.nth_rotation(n), piece, "{kind} should cycle after {n}");
            assert_eq!(piece.nth_rotation(n + 1), piece.next_rotation());
        }
    }

    #[test]
    fn test_distinct_orientations_are_distinct() {
        for kind in PieceKind::ALL {
            let shapes: Vec<_> = orientations(kind).into_iter().map(sorted_cells).collect();
            for (i, a) in shapes.iter().enumerate() {
                for b in &shapes[i + 1..] {
                    assert_ne!(a, b, "{kind} repeats an orientation");
                }
            }
        }
    }

    #[test]
    fn test_symmetric_pieces_return_to_spawn_shape() {
        // Two quarter turns of I, S and Z give the spawn shape back, which is
        // why they only expose two orientations.
        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            let shapes = PIECE_SHAPES[kind as usize];
            let mut a = shapes[0];
            let mut b = shapes[2];
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "{kind}");
        }
    }

    #[test]
    fn test_t_piece_skirt() {
        // Spawn orientation: .#.
        //                    ###
        let t = Piece::new(PieceKind::T);
        assert_eq!((t.width(), t.height()), (3, 2));
        assert_eq!(t.skirt().as_slice(), &[0, 0, 0]);

        // One turn left: the stem points left and the middle column floats.
        let t1 = t.next_rotation();
        assert_eq!((t1.width(), t1.height()), (2, 3));
        assert_eq!(t1.skirt().as_slice(), &[1, 0]);
    }

    #[test]
    fn test_every_piece_has_four_cells_inside_its_box() {
        for kind in PieceKind::ALL {
            for piece in orientations(kind) {
                let cells = sorted_cells(piece);
                assert_eq!(cells.len(), 4);
                assert!(cells.iter().any(|&(x, _)| x == 0));
                assert!(cells.iter().any(|&(_, y)| y == 0));
                assert!(cells.iter().all(|&(x, y)| x < 4 && y < 4));
            }
        }
    }

    #[test]
    fn test_piece_serialization() {
        let piece = Piece::with_rotation(PieceKind::S, 1);
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"S#1\"");

        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_deserialization_error_cases() {
        assert!(serde_json::from_str::<Piece>("\"S1\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"X#1\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"O#1\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#4\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#-1\"").is_err());
    }

    #[test]
    fn test_piece_kind_parsing() {
        assert_eq!("t".parse::<PieceKind>(), Ok(PieceKind::T));
        assert_eq!(" I ".parse::<PieceKind>(), Ok(PieceKind::I));
        assert!("TT".parse::<PieceKind>().is_err());
        assert!("".parse::<PieceKind>().is_err());
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
    }
}
