use crate::engine::board::Board;
use crate::engine::square_set::SquareSet;
use crate::engine::types::{Color, Square};

/// A列（x = 0）のマスク。
const FILE_A: u64 = 0x0101_0101_0101_0101;

/// H列（x = 7）のマスク。
const FILE_H: u64 = 0x8080_8080_8080_8080;

/// 1方向に挟める相手石の最大数から、初手の1マスを除いた追加の伸長回数。
const SPREAD_STEPS: u8 = 5;

/// 盤面上の8方向。
///
/// 各方向はビットボードを1マスずらす操作として表し、盤の端を越えて
/// 反対側の列へ回り込むビットは捨てる。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Direction {
    /// (0, +1)
    Down,
    /// (-1, +1)
    DownLeft,
    /// (+1, +1)
    DownRight,
    /// (-1, 0)
    Left,
    /// (+1, 0)
    Right,
    /// (0, -1)
    Up,
    /// (-1, -1)
    UpLeft,
    /// (+1, -1)
    UpRight,
}

impl Direction {
    /// 全8方向。
    pub const ALL: [Self; 8] = [
        Self::Down,
        Self::DownLeft,
        Self::DownRight,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::UpLeft,
        Self::UpRight,
    ];

    /// 単位ベクトル（dx, dy）を返す。
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Down => (0, 1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
        }
    }

    /// ビットボード全体をこの方向へ1マスずらす。
    #[inline]
    #[must_use]
    pub const fn step(self, bb: u64) -> u64 {
        match self {
            Self::Down => bb.wrapping_shl(8),
            Self::DownLeft => (bb & !FILE_A).wrapping_shl(7),
            Self::DownRight => (bb & !FILE_H).wrapping_shl(9),
            Self::Left => (bb & !FILE_A).wrapping_shr(1),
            Self::Right => (bb & !FILE_H).wrapping_shl(1),
            Self::Up => bb.wrapping_shr(8),
            Self::UpLeft => (bb & !FILE_A).wrapping_shr(9),
            Self::UpRight => (bb & !FILE_H).wrapping_shr(7),
        }
    }

    /// `start` に隣接する相手石の連なりを、この方向へ伸ばせるだけ伸ばす。
    #[inline]
    const fn run_from(self, start: u64, opponent: u64) -> u64 {
        let mut run = self.step(start) & opponent;
        let mut steps = u8::MIN;
        while steps < SPREAD_STEPS {
            run |= self.step(run) & opponent;
            steps = steps.wrapping_add(1);
        }
        run
    }
}

/// 指定マスへ `color` が着手したときに反転する石の集合を返す。
///
/// マスが空でない場合、または1枚も挟めない場合は空集合（＝非合法手）。
#[inline]
#[must_use]
pub fn compute_flips(board: Board, square: Square, color: Color) -> SquareSet {
    let mv = square.bit();
    if board.occupied().bits() & mv != u64::MIN {
        return SquareSet::EMPTY;
    }

    let player = board.stones(color);
    let opponent = board.stones(color.opponent());
    let mut flipped = u64::MIN;

    for direction in Direction::ALL {
        let run = direction.run_from(mv, opponent);
        // 連なりの先が自石で終わるときだけ確定させる（空き・盤外なら捨てる）。
        if run != u64::MIN && direction.step(run) & player != u64::MIN {
            flipped |= run;
        }
    }

    SquareSet::from_bits(flipped)
}

/// 指定マスが `color` にとって合法手かを返す。
#[inline]
#[must_use]
pub fn is_legal(board: Board, square: Square, color: Color) -> bool {
    board.cell(square).is_empty() && !compute_flips(board, square, color).is_empty()
}

/// `color` の合法手の集合を返す。
///
/// 全マスを方向ごとにまとめて調べる。結果は各マスで `is_legal` と一致する。
#[inline]
#[must_use]
pub fn legal_moves(board: Board, color: Color) -> SquareSet {
    let player = board.stones(color);
    let opponent = board.stones(color.opponent());
    let empty = !board.occupied().bits();
    let mut moves = u64::MIN;

    for direction in Direction::ALL {
        let run = direction.run_from(player, opponent);
        moves |= direction.step(run) & empty;
    }

    SquareSet::from_bits(moves)
}
