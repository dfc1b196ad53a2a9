use core::fmt;
use core::str::FromStr;

use crate::engine::error::{EngineError, ParseBoardError};
use crate::engine::square_set::SquareSet;
use crate::engine::types::{Cell, Color, Square};

/// 初期配置の黒石（(3, 3) と (4, 4)）。
const OPENING_BLACK: u64 = 0x0000_0010_0800_0000;

/// 初期配置の白石（(4, 3) と (3, 4)）。
const OPENING_WHITE: u64 = 0x0000_0008_1000_0000;

/// 8×8 の盤面。
///
/// 黒石・白石をそれぞれビットボードで保持する。ルールの知識は持たず、
/// 合法性の判断は `rules` と `GameEngine` の責務。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// 黒石のビットボード。
    black: u64,
    /// 白石のビットボード。
    white: u64,
}

impl Board {
    /// 指定マスの状態を返す。
    #[inline]
    #[must_use]
    pub fn cell(self, square: Square) -> Cell {
        let mask = square.bit();
        if self.black & mask != u64::MIN {
            Cell::Black
        } else if self.white & mask != u64::MIN {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// 石数（黒、白、空き）を返す。合計は常に64。
    #[inline]
    #[must_use]
    pub const fn count(self) -> (u32, u32, u32) {
        let black = self.black.count_ones();
        let white = self.white.count_ones();
        let empty = (self.black | self.white).count_zeros();
        (black, white, empty)
    }

    /// 全マスが空の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            black: u64::MIN,
            white: u64::MIN,
        }
    }

    /// 座標（x, y）のマスの状態を返す。
    ///
    /// # Errors
    ///
    /// 座標が盤外なら `EngineError::OutOfBounds` を返す。
    #[inline]
    pub fn get(self, x: u8, y: u8) -> Result<Cell, EngineError> {
        match Square::from_xy(x, y) {
            Some(square) => Ok(self.cell(square)),
            None => Err(EngineError::OutOfBounds { x, y }),
        }
    }

    /// 空きマスが無いかを返す。
    #[inline]
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.black | self.white == u64::MAX
    }

    /// 石のあるマスの集合を返す。
    #[inline]
    #[must_use]
    pub const fn occupied(self) -> SquareSet {
        SquareSet::from_bits(self.black | self.white)
    }

    /// 初期局面の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn opening() -> Self {
        Self {
            black: OPENING_BLACK,
            white: OPENING_WHITE,
        }
    }

    /// 指定マスを上書きする（範囲チェック済みの `Square` 用）。
    #[inline]
    pub(crate) fn put(&mut self, square: Square, cell: Cell) {
        let mask = square.bit();
        self.black &= !mask;
        self.white &= !mask;

        match cell {
            Cell::Black => self.black |= mask,
            Cell::White => self.white |= mask,
            Cell::Empty => {}
        }
    }

    /// 全マスを空にしてから初期配置を置く。
    #[inline]
    pub fn reset_to_opening(&mut self) {
        *self = Self::empty();
        for square in SquareSet::from_bits(OPENING_BLACK) {
            self.put(square, Cell::Black);
        }
        for square in SquareSet::from_bits(OPENING_WHITE) {
            self.put(square, Cell::White);
        }
    }

    /// 座標（x, y）のマスを無条件に上書きする。
    ///
    /// # Errors
    ///
    /// 座標が盤外なら `EngineError::OutOfBounds` を返す（盤面は変更しない）。
    #[inline]
    pub fn set(&mut self, x: u8, y: u8, cell: Cell) -> Result<(), EngineError> {
        match Square::from_xy(x, y) {
            Some(square) => {
                self.put(square, cell);
                Ok(())
            }
            None => Err(EngineError::OutOfBounds { x, y }),
        }
    }

    /// 指定色の石のビットボードを返す。
    #[inline]
    pub(crate) const fn stones(self, color: Color) -> u64 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// 指定色の石があるマスの集合を返す。
    #[inline]
    #[must_use]
    pub const fn squares_of(self, color: Color) -> SquareSet {
        SquareSet::from_bits(self.stones(color))
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::opening()
    }
}

impl fmt::Display for Board {
    /// 上段（y = 0）から8行、`B` / `W` / `.` で出力する。
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = Square::BOARD_LEN.wrapping_sub(1);
        let mut text = String::with_capacity(72);
        for square in Square::all() {
            text.push(self.cell(square).symbol());
            if square.x() == last && square.y() != last {
                text.push('\n');
            }
        }
        formatter.write_str(&text)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// `Display` と同じ形式を読む。空白・改行は無視する。
    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut board = Self::empty();
        let mut found: usize = 0;

        for symbol in text.chars().filter(|ch| !ch.is_whitespace()) {
            let Some(cell) = Cell::from_symbol(symbol) else {
                return Err(ParseBoardError::InvalidSymbol { symbol });
            };

            if let Some(square) = u8::try_from(found).ok().and_then(Square::from_index) {
                board.put(square, cell);
            }
            found = found.saturating_add(1);
        }

        if found != usize::from(Square::COUNT) {
            return Err(ParseBoardError::WrongCellCount { found });
        }

        Ok(board)
    }
}
