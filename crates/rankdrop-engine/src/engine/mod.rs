//! Headless game loop around the reference board.
//!
//! - [`GameField`] - board, falling piece and upcoming pieces
//! - [`GameStats`] - score, locked pieces and cleared rows
//! - [`PieceBuffer`] - 7-bag piece generation
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! A brain picks an orientation and a column for
//! [`GameField::falling_piece`], then [`GameField::complete_piece_drop`] locks
//! it, clears rows and draws the next piece, until the stack tops out.
//!
//! # Example
//!
//! ```
//! use rankdrop_engine::{GameField, GameStats};
//!
//! let mut field = GameField::new(10, 20).unwrap();
//! let mut stats = GameStats::new();
//!
//! let piece = *field.falling_piece();
//! let (cleared_rows, result) = field.complete_piece_drop(&piece, 0);
//! stats.complete_piece_drop(cleared_rows);
//!
//! assert!(result.is_ok());
//! assert_eq!(stats.completed_pieces(), 1);
//! ```

pub use self::{game_field::*, game_stats::*, piece_buffer::*};

mod game_field;
mod game_stats;
mod piece_buffer;
