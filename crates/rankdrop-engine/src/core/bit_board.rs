use std::fmt;

use arrayvec::ArrayVec;

use crate::{BoardError, PlaceError};

use super::{
    game_board::{GameBoard, GamePiece, PlaceResult},
    piece::Piece,
};

/// Widest board a [`BitRow`] can hold.
pub const MAX_WIDTH: usize = 64;

/// Rows kept above the visible board so that a piece dropped onto a stack that
/// reaches the top still has room to land.
pub const HIDDEN_ROWS: usize = 4;

/// Single row in the bit board representation.
///
/// Bit `x` is set when the cell in column `x` is occupied. Bits at or past the
/// board width are always clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitRow {
    bits: u64,
}

impl BitRow {
    pub const EMPTY: Self = Self { bits: 0 };

    const fn full_mask(width: usize) -> u64 {
        if width >= MAX_WIDTH {
            u64::MAX
        } else {
            (1 << width) - 1
        }
    }

    /// Checks if every cell of a row `width` cells wide is occupied.
    #[inline]
    #[must_use]
    pub fn is_filled(self, width: usize) -> bool {
        let mask = Self::full_mask(width);
        (self.bits & mask) == mask
    }

    /// Checks if the cell in column `x` is occupied.
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, x: usize) -> bool {
        x < MAX_WIDTH && (self.bits & (1 << x)) != 0
    }

    #[inline]
    fn occupy_cell(&mut self, x: usize) {
        self.bits |= 1 << x;
    }

    #[inline]
    fn vacate_cell(&mut self, x: usize) {
        self.bits &= !(1 << x);
    }

    /// Iterates over the first `width` cells of the row, returning their occupied status.
    #[inline]
    pub fn iter_cells(self, width: usize) -> impl Iterator<Item = bool> {
        (0..width).map(move |x| self.is_cell_occupied(x))
    }
}

/// Cells filled by the most recent placement, kept for [`Board::undo`].
type PendingPlacement = ArrayVec<(usize, usize), 4>;

/// Fixed-width Tetris grid stored as one [`BitRow`] per row.
///
/// The board keeps `height` visible rows plus [`HIDDEN_ROWS`] spare rows on
/// top. Column heights are cached and kept in sync by every mutation.
///
/// Placement is two-phase in the classic "brain" style: [`place`](Self::place)
/// fills cells and remembers them, [`undo`](Self::undo) takes the most recent
/// placement back. Placing a second piece keeps the first one, so only the
/// latest placement can be undone. [`clear_rows`](Self::clear_rows) removes
/// full rows and forgets the pending placement.
///
/// # Example
///
/// ```
/// use rankdrop_engine::Board;
///
/// let board = Board::from_ascii(
///     12,
///     r"
///     .#..######
///     #..#######
///     ",
/// )
/// .unwrap();
///
/// assert_eq!(board.width(), 10);
/// assert_eq!(board.column_height(0), 1);
/// assert_eq!(board.column_height(1), 2);
/// assert_eq!(board.column_height(2), 0);
/// assert!(!board.has_block_at(1, 0));
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<BitRow>,
    column_heights: Vec<usize>,
    pending: Option<PendingPlacement>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.rows == other.rows
    }
}

impl Eq for Board {}

impl Board {
    pub const MAX_WIDTH: usize = MAX_WIDTH;
    pub const HIDDEN_ROWS: usize = HIDDEN_ROWS;

    /// Creates an empty board `width` columns wide with `height` visible rows.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(BoardError::InvalidWidth { width });
        }
        if height == 0 {
            return Err(BoardError::InvalidHeight);
        }
        Ok(Self {
            width,
            height,
            rows: vec![BitRow::EMPTY; height + HIDDEN_ROWS],
            column_heights: vec![0; width],
            pending: None,
        })
    }

    /// Creates a board from ASCII art.
    ///
    /// `#` is an occupied cell and `.` an empty one. Rows are written from top
    /// to bottom and the last row is the floor. Leading and trailing whitespace
    /// on each line is ignored, as are blank lines. The width is taken from the
    /// rows; `height` is the number of visible rows and must be at least the
    /// number of rows drawn.
    pub fn from_ascii(height: usize, art: &str) -> Result<Self, BoardError> {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(BoardError::EmptyArt);
        };
        if lines.len() > height {
            return Err(BoardError::TooManyRows {
                rows: lines.len(),
                height,
            });
        }

        let width = first.chars().count();
        let mut board = Self::new(width, height)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            let y = lines.len() - 1 - row;
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    '#' => board.rows[y].occupy_cell(x),
                    '.' => {}
                    _ => return Err(BoardError::InvalidCell { row, ch }),
                }
            }
        }
        board.recompute_column_heights();
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of visible rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn column_height(&self, x: usize) -> usize {
        self.column_heights[x]
    }

    #[must_use]
    pub fn column_heights(&self) -> &[usize] {
        &self.column_heights
    }

    #[must_use]
    pub fn has_block_at(&self, x: usize, y: usize) -> bool {
        x < self.width && self.rows.get(y).is_some_and(|row| row.is_cell_occupied(x))
    }

    #[must_use]
    pub fn largest_height(&self) -> usize {
        self.column_heights.iter().copied().max().unwrap_or(0)
    }

    /// Returns an iterator over the rows from the floor up, including hidden rows.
    pub fn rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.rows.iter().copied()
    }

    /// Row the piece comes to rest on when dropped straight down at column `x`.
    ///
    /// Pieces fall past overhangs only as far as the column heights allow; they
    /// never slide underneath occupied cells.
    ///
    /// # Panics
    ///
    /// Panics if the piece does not fit horizontally at column `x`.
    #[must_use]
    pub fn row_after_drop(&self, piece: &Piece, x: usize) -> usize {
        piece
            .skirt()
            .iter()
            .enumerate()
            .map(|(dx, &lowest)| self.column_heights[x + dx].saturating_sub(lowest))
            .max()
            .unwrap_or(0)
    }

    /// Fills the cells of `piece` with its bounding box's bottom-left corner at `(x, y)`.
    ///
    /// Full rows are reported but not cleared. The placement can be reverted
    /// with [`undo`](Self::undo) until another piece is placed or rows are
    /// cleared. On error the board is left untouched.
    pub fn place(&mut self, piece: &Piece, x: usize, y: usize) -> Result<PlaceResult, PlaceError> {
        if x + piece.width() > self.width || y + piece.height() > self.rows.len() {
            return Err(PlaceError::OutOfBounds { x, y });
        }

        let cells: PendingPlacement = piece.cells().map(|(dx, dy)| (x + dx, y + dy)).collect();
        if cells
            .iter()
            .any(|&(cx, cy)| self.rows[cy].is_cell_occupied(cx))
        {
            return Err(PlaceError::Collision { x, y });
        }

        let mut result = PlaceResult::Placed;
        for &(cx, cy) in &cells {
            self.rows[cy].occupy_cell(cx);
            self.column_heights[cx] = usize::max(self.column_heights[cx], cy + 1);
        }
        for &(_, cy) in &cells {
            if self.rows[cy].is_filled(self.width) {
                result = PlaceResult::RowFilled;
            }
        }
        self.pending = Some(cells);
        Ok(result)
    }

    /// Reverts the most recent placement, if it has not been undone or committed yet.
    pub fn undo(&mut self) {
        let Some(cells) = self.pending.take() else {
            return;
        };
        for &(cx, cy) in &cells {
            self.rows[cy].vacate_cell(cx);
        }
        for &(cx, _) in &cells {
            self.column_heights[cx] = self.scan_column_height(cx);
        }
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Rows above a cleared row move down. The pending placement, if any,
    /// becomes permanent.
    pub fn clear_rows(&mut self) -> usize {
        self.pending = None;

        let mut count = 0;
        for y in 0..self.rows.len() {
            if self.rows[y].is_filled(self.width) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y - count] = self.rows[y];
            }
        }

        // Fill the vacated rows at the top with empty rows
        let total = self.rows.len();
        self.rows[total - count..].fill(BitRow::EMPTY);
        if count > 0 {
            self.recompute_column_heights();
        }
        count
    }

    fn scan_column_height(&self, x: usize) -> usize {
        (0..self.rows.len())
            .rev()
            .find(|&y| self.rows[y].is_cell_occupied(x))
            .map_or(0, |y| y + 1)
    }

    fn recompute_column_heights(&mut self) {
        for x in 0..self.width {
            self.column_heights[x] = self.scan_column_height(x);
        }
    }
}

impl GameBoard for Board {
    type Piece = Piece;

    fn width(&self) -> usize {
        Board::width(self)
    }

    fn column_height(&self, x: usize) -> usize {
        Board::column_height(self, x)
    }

    fn has_block_at(&self, x: usize, y: usize) -> bool {
        Board::has_block_at(self, x, y)
    }

    fn largest_height(&self) -> usize {
        Board::largest_height(self)
    }

    fn row_after_drop(&self, piece: &Piece, x: usize) -> usize {
        Board::row_after_drop(self, piece, x)
    }

    fn place(&mut self, piece: &Piece, x: usize, y: usize) -> Result<PlaceResult, PlaceError> {
        Board::place(self, piece, x, y)
    }

    fn undo(&mut self) {
        Board::undo(self);
    }
}

/// Renders the board in the format accepted by [`Board::from_ascii`].
///
/// All visible rows are drawn, plus any hidden rows the stack has reached.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = usize::max(self.height, self.largest_height());
        for row in self.rows[..top].iter().rev() {
            for occupied in row.iter_cells(self.width) {
                f.write_str(if occupied { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::PieceKind;

    use super::*;

    fn stick() -> Piece {
        Piece::new(PieceKind::I)
    }

    fn flat_stick() -> Piece {
        Piece::with_rotation(PieceKind::I, 1)
    }

    #[test]
    fn test_new_rejects_degenerate_sizes() {
        assert_eq!(Board::new(0, 10), Err(BoardError::InvalidWidth { width: 0 }));
        assert_eq!(
            Board::new(65, 10),
            Err(BoardError::InvalidWidth { width: 65 })
        );
        assert_eq!(Board::new(10, 0), Err(BoardError::InvalidHeight));
        assert!(Board::new(64, 1).is_ok());
    }

    #[test]
    fn test_from_ascii_heights_and_cells() {
        let board = Board::from_ascii(
            24,
            r"
            ....##....
            ####..####
            ",
        )
        .unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 24);
        assert_eq!(board.column_heights(), &[1, 1, 1, 1, 2, 2, 1, 1, 1, 1]);
        assert!(board.has_block_at(4, 1));
        assert!(!board.has_block_at(4, 0));
        assert!(!board.has_block_at(10, 0));
        assert_eq!(board.largest_height(), 2);
    }

    #[test]
    fn test_from_ascii_errors() {
        assert_eq!(Board::from_ascii(10, "\n  \n"), Err(BoardError::EmptyArt));
        assert_eq!(
            Board::from_ascii(10, "....\n..."),
            Err(BoardError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Board::from_ascii(10, "..x."),
            Err(BoardError::InvalidCell { row: 0, ch: 'x' })
        );
        assert_eq!(
            Board::from_ascii(1, "....\n...."),
            Err(BoardError::TooManyRows { rows: 2, height: 1 })
        );
    }

    #[test]
    fn test_display_round_trip() {
        let board = Board::from_ascii(4, "#...\n##.#").unwrap();
        let rendered = board.to_string();
        assert_eq!(rendered, "....\n....\n#...\n##.#\n");
        assert_eq!(Board::from_ascii(4, &rendered).unwrap(), board);
    }

    #[test]
    fn test_row_after_drop_uses_skirt() {
        let board = Board::from_ascii(10, "#...\n##..").unwrap();
        // T rotated left: stem on the left, floating one row up.
        let t = Piece::with_rotation(PieceKind::T, 1);
        assert_eq!(t.skirt().as_slice(), &[1, 0]);
        // The stem over column 0 (height 2) decides the landing row.
        assert_eq!(board.row_after_drop(&t, 0), 1);
        // The stem hangs over column 1 (height 1) without touching it.
        assert_eq!(board.row_after_drop(&t, 1), 0);
        assert_eq!(board.row_after_drop(&t, 2), 0);
        assert_eq!(board.row_after_drop(&stick(), 3), 0);
    }

    #[test]
    fn test_place_and_undo_restore_board() {
        let mut board = Board::from_ascii(10, "#.........\n##.#######").unwrap();
        let before = board.clone();

        let row = board.row_after_drop(&stick(), 2);
        assert_eq!(row, 0);
        let result = board.place(&stick(), 2, row).unwrap();
        assert!(result.is_row_filled());
        assert_eq!(board.column_height(2), 4);
        assert_eq!(board.largest_height(), 4);

        board.undo();
        assert_eq!(board, before);
        assert_eq!(board.column_heights(), before.column_heights());

        // A second undo has nothing to revert.
        board.undo();
        assert_eq!(board, before);
    }

    #[test]
    fn test_undo_restores_height_over_holes() {
        let mut board = Board::from_ascii(10, "#...\n....\n#...").unwrap();
        assert_eq!(board.column_height(0), 3);
        let piece = Piece::new(PieceKind::O);
        let row = board.row_after_drop(&piece, 0);
        assert_eq!(row, 3);
        assert!(board.place(&piece, 0, row).unwrap().is_placed());
        assert_eq!(board.column_height(0), 5);
        assert_eq!(board.column_height(1), 5);
        board.undo();
        assert_eq!(board.column_height(0), 3);
        assert_eq!(board.column_height(1), 0);
    }

    #[test]
    fn test_failed_place_leaves_board_untouched() {
        let mut board = Board::from_ascii(4, "....\n.#..").unwrap();
        let before = board.clone();

        assert_eq!(
            board.place(&flat_stick(), 0, 0),
            Err(PlaceError::Collision { x: 0, y: 0 })
        );
        assert_eq!(
            board.place(&flat_stick(), 1, 1),
            Err(PlaceError::OutOfBounds { x: 1, y: 1 })
        );
        assert_eq!(
            board.place(&stick(), 0, 5),
            Err(PlaceError::OutOfBounds { x: 0, y: 5 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_hidden_rows_accept_drops_on_full_stack() {
        let mut board = Board::from_ascii(2, "#\n#").unwrap();
        let row = board.row_after_drop(&stick(), 0);
        assert_eq!(row, 2);
        board.place(&stick(), 0, row).unwrap();
        assert_eq!(board.largest_height(), 6);
        assert_eq!(board.to_string().lines().count(), 6);
    }

    #[test]
    fn test_clear_rows_shifts_rows_down() {
        let mut board = Board::from_ascii(
            10,
            r"
            ..#.
            ####
            #.#.
            ####
            ",
        )
        .unwrap();

        let cleared = board.clear_rows();
        assert_eq!(cleared, 2);
        assert_eq!(board.to_string().lines().rev().take(2).collect::<Vec<_>>(), ["#.#.", "..#."]);
        assert_eq!(board.column_heights(), &[1, 0, 2, 0]);
    }

    #[test]
    fn test_clear_rows_commits_pending_placement() {
        let mut board = Board::from_ascii(10, "###.").unwrap();
        board.place(&stick(), 3, 0).unwrap();
        assert_eq!(board.clear_rows(), 1);
        assert_eq!(board.column_heights(), &[0, 0, 0, 3]);

        board.undo();
        assert_eq!(board.column_heights(), &[0, 0, 0, 3]);
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut board = Board::from_ascii(3, "##\n##\n##").unwrap();
        assert_eq!(board.clear_rows(), 3);
        assert_eq!(board.largest_height(), 0);
        assert!(board.rows().all(|row| row == BitRow::EMPTY));
    }

    #[test]
    fn test_bit_row_is_filled() {
        let mut row = BitRow::EMPTY;
        assert!(!row.is_filled(3));
        for x in 0..3 {
            row.occupy_cell(x);
        }
        assert!(row.is_filled(3));
        assert!(!row.is_filled(4));

        let mut wide = BitRow::EMPTY;
        for x in 0..MAX_WIDTH {
            wide.occupy_cell(x);
        }
        assert!(wide.is_filled(MAX_WIDTH));
    }
}
