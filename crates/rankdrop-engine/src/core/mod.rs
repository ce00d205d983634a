pub use self::{bit_board::*, game_board::*, moves::*, piece::*};

pub(crate) mod bit_board;
pub(crate) mod game_board;
pub(crate) mod moves;
pub(crate) mod piece;
