use crate::engine::types::Square;

/// マスの集合（1マス1ビットのビットボード）。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SquareSet(
    /// `Square::index` 番目のビットが立っていれば、そのマスを含む。
    u64,
);

impl SquareSet {
    /// 空集合。
    pub const EMPTY: Self = Self(u64::MIN);

    /// 生のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// 指定マスを含むかを返す。
    #[inline]
    #[must_use]
    pub fn contains(self, square: Square) -> bool {
        self.0 & square.bit() != u64::MIN
    }

    /// ビットボードから集合を生成する。
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// 指定マスを追加する。
    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.bit();
    }

    /// 空集合かどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == u64::MIN
    }

    /// 要素を昇順に列挙する。
    #[inline]
    #[must_use]
    pub const fn iter(self) -> Squares {
        Squares { bits: self.0 }
    }

    /// 要素数を返す。
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }
}

impl FromIterator<Square> for SquareSet {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type IntoIter = Squares;
    type Item = Square;

    #[inline]
    fn into_iter(self) -> Squares {
        self.iter()
    }
}

/// `SquareSet` の要素をインデックス昇順に返すイテレータ。
#[derive(Copy, Clone, Debug)]
pub struct Squares {
    /// 未列挙のビット。
    bits: u64,
}

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.bits == u64::MIN {
            return None;
        }

        let index = u8::try_from(self.bits.trailing_zeros()).ok();
        self.bits &= self.bits.wrapping_sub(1);

        index.map(Square::from_index_unchecked)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.bits.count_ones()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Squares {}
