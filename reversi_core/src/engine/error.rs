use core::fmt;

/// 盤面操作・着手に失敗した理由。
///
/// いずれも回復可能で、失敗した操作は盤面・手番を一切変更しない。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    /// すでに終局している（`reset` が必要）。
    GameOver,
    /// 指定マスが合法手ではない（石がある、または1枚も返せない）。
    IllegalMove {
        /// x 座標。
        x: u8,
        /// y 座標。
        y: u8,
    },
    /// 座標が盤面の外。
    OutOfBounds {
        /// x 座標。
        x: u8,
        /// y 座標。
        y: u8,
    },
}

impl fmt::Display for EngineError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::GameOver => formatter.write_str("the game is over; reset to play again"),
            Self::IllegalMove { x, y } => {
                write!(formatter, "({x}, {y}) is not a legal move")
            }
            Self::OutOfBounds { x, y } => {
                write!(formatter, "({x}, {y}) is outside the 8x8 board")
            }
        }
    }
}

impl core::error::Error for EngineError {}

/// 盤面テキストの解析に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseBoardError {
    /// `B` / `W` / `.` / `-` 以外の文字が含まれていた。
    InvalidSymbol {
        /// 不正な文字。
        symbol: char,
    },
    /// マスの数が64ではなかった。
    WrongCellCount {
        /// 読み取れたマスの数。
        found: usize,
    },
}

impl fmt::Display for ParseBoardError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidSymbol { symbol } => {
                write!(formatter, "unexpected board symbol {symbol:?}")
            }
            Self::WrongCellCount { found } => {
                write!(formatter, "expected 64 cells, found {found}")
            }
        }
    }
}

impl core::error::Error for ParseBoardError {}
