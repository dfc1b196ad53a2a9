/// 手番（石の色）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Color {
    /// 先手。
    Black,
    /// 後手。
    White,
}

impl Color {
    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// マスの占有状態。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Cell {
    /// 黒石。
    Black,
    /// 空きマス。
    #[default]
    Empty,
    /// 白石。
    White,
}

impl Cell {
    /// 石の色を返す（空きマスなら `None`）。
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Black => Some(Color::Black),
            Self::Empty => None,
            Self::White => Some(Color::White),
        }
    }

    /// 盤面テキスト表現の1文字から `Cell` を得る。
    ///
    /// `B` / `W` のほか、空きマスとして `.` と `-` を受け付ける。
    #[inline]
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'B' | 'b' => Some(Self::Black),
            '.' | '-' => Some(Self::Empty),
            'W' | 'w' => Some(Self::White),
            _ => None,
        }
    }

    /// 空きマスかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 盤面テキスト表現での1文字を返す。
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Black => 'B',
            Self::Empty => '.',
            Self::White => 'W',
        }
    }
}

impl From<Color> for Cell {
    #[inline]
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

/// 盤面上のマス（0..=63のインデックス）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Square(
    /// `y * 8 + x` に対応する0..=63の値。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 8;

    /// 盤面のマス数。
    pub const COUNT: u8 = 64;

    /// 全マスを昇順に列挙する。
    #[inline]
    pub fn all() -> impl Iterator<Item = Self> {
        (u8::MIN..Self::COUNT).map(Self)
    }

    /// そのマスを表すビット（`u64`）を返す。
    #[inline]
    #[must_use]
    pub fn bit(self) -> u64 {
        let one = u64::MIN.wrapping_add(1);
        let shift = u32::from(self.0);

        one.checked_shl(shift).unwrap_or(u64::MIN)
    }

    /// インデックス（0..=63）から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index >= Self::COUNT {
            return None;
        }

        Some(Self(index))
    }

    /// インデックスから `Square` を生成する（範囲チェックなし）。
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// 盤面座標（x, y）から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_xy(x: u8, y: u8) -> Option<Self> {
        if x >= Self::BOARD_LEN || y >= Self::BOARD_LEN {
            return None;
        }

        let row_start = match y.checked_mul(Self::BOARD_LEN) {
            Some(value) => value,
            None => return None,
        };

        match row_start.checked_add(x) {
            Some(idx) => Some(Self(idx)),
            None => None,
        }
    }

    /// 0..=63 のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// x 座標（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn x(self) -> u8 {
        match self.0.checked_rem(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// y 座標（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn y(self) -> u8 {
        match self.0.checked_div(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Color, Square};

    #[test]
    fn square_round_trips_coordinates_and_rejects_out_of_range() {
        let square = Square::from_xy(5, 3);
        assert_eq!(square.map(Square::index), Some(29));
        assert_eq!(square.map(Square::x), Some(5));
        assert_eq!(square.map(Square::y), Some(3));

        assert_eq!(Square::from_xy(8, 0), None);
        assert_eq!(Square::from_xy(0, 8), None);
        assert_eq!(Square::from_index(64), None);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn cell_symbols_and_colors_agree() {
        for cell in [Cell::Black, Cell::Empty, Cell::White] {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }

        assert_eq!(Cell::from(Color::Black).color(), Some(Color::Black));
        assert_eq!(Cell::from(Color::White).color(), Some(Color::White));
        assert_eq!(Cell::Empty.color(), None);
        assert_eq!(Cell::from_symbol('x'), None);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
