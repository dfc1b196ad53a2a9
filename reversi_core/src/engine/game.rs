use tracing::{debug, info};

use crate::engine::board::Board;
use crate::engine::error::EngineError;
use crate::engine::rules;
use crate::engine::square_set::SquareSet;
use crate::engine::types::{Cell, Color, Square};

/// 盤面の一辺（`usize`）。
const BOARD_LEN: usize = 8;

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 終局（双方とも打てない、または盤面が埋まった）。
    GameOver {
        /// 黒の石数。
        black: u32,
        /// 白の石数。
        white: u32,
    },
    /// 進行中。
    InProgress,
}

/// 石数による得点。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Score {
    /// 黒の石数。
    black: u32,
    /// 白の石数。
    white: u32,
}

impl Score {
    /// 黒の石数を返す。
    #[inline]
    #[must_use]
    pub const fn black(self) -> u32 {
        self.black
    }

    /// 盤面から得点を数える。
    #[inline]
    #[must_use]
    pub const fn from_board(board: Board) -> Self {
        let (black, white, _empty) = board.count();
        Self { black, white }
    }

    /// 勝者側から見た石差を返す（引き分けなら0）。
    #[inline]
    #[must_use]
    pub const fn margin(self) -> u32 {
        self.black.abs_diff(self.white)
    }

    /// 白の石数を返す。
    #[inline]
    #[must_use]
    pub const fn white(self) -> u32 {
        self.white
    }

    /// 石数の多い側を返す（同数なら `None`）。
    #[inline]
    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        if self.black > self.white {
            Some(Color::Black)
        } else if self.white > self.black {
            Some(Color::White)
        } else {
            None
        }
    }
}

/// 受理された着手の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MoveOutcome {
    /// 着手後の手番。
    current_player: Color,
    /// 反転した石。
    flipped: SquareSet,
    /// 相手が打てず、着手側が続けて打つか。
    passed: bool,
    /// 石を置いたマス。
    placed: Square,
    /// 着手後のゲーム状態。
    status: Status,
}

impl MoveOutcome {
    /// 着手後の手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(self) -> Color {
        self.current_player
    }

    /// 反転した石の集合を返す。
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> SquareSet {
        self.flipped
    }

    /// 相手がパスになり、着手側の手番が続くかを返す。
    #[inline]
    #[must_use]
    pub const fn passed(self) -> bool {
        self.passed
    }

    /// 石を置いたマスを返す。
    #[inline]
    #[must_use]
    pub const fn placed(self) -> Square {
        self.placed
    }

    /// 着手後のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub const fn status(self) -> Status {
        self.status
    }
}

/// `GameEngine::try_move` の結果。着手が拒否された場合も状態を添えて返す。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MoveResult {
    /// 着手が受理されたか。
    accepted: bool,
    /// 現在の手番。
    current_player: Color,
    /// 反転した石（拒否時は空）。
    flipped: SquareSet,
    /// 終局しているか。
    is_over: bool,
    /// 拒否理由（受理時は `None`）。
    rejection: Option<EngineError>,
    /// 現在の得点。
    score: Score,
}

impl MoveResult {
    /// 着手が受理されたかを返す。
    #[inline]
    #[must_use]
    pub const fn accepted(self) -> bool {
        self.accepted
    }

    /// 現在の手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(self) -> Color {
        self.current_player
    }

    /// 反転した石の集合を返す。
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> SquareSet {
        self.flipped
    }

    /// 終局しているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        self.is_over
    }

    /// 拒否理由を返す。
    #[inline]
    #[must_use]
    pub const fn rejection(self) -> Option<EngineError> {
        self.rejection
    }

    /// 現在の得点を返す。
    #[inline]
    #[must_use]
    pub const fn score(self) -> Score {
        self.score
    }
}

/// 描画用の読み取り専用スナップショット。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// 盤面。
    board: Board,
    /// 手番。
    current_player: Color,
    /// 終局しているか。
    is_over: bool,
    /// 得点。
    score: Score,
}

impl Snapshot {
    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(self) -> Board {
        self.board
    }

    /// 座標（x, y）のマスの状態を返す。
    ///
    /// # Errors
    ///
    /// 座標が盤外なら `EngineError::OutOfBounds` を返す。
    #[inline]
    pub fn cell(self, x: u8, y: u8) -> Result<Cell, EngineError> {
        self.board.get(x, y)
    }

    /// 手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(self) -> Color {
        self.current_player
    }

    /// `[y][x]` で引ける 8×8 のマス配列を返す。
    #[inline]
    #[must_use]
    pub fn grid(self) -> [[Cell; BOARD_LEN]; BOARD_LEN] {
        let mut grid = [[Cell::Empty; BOARD_LEN]; BOARD_LEN];
        for (square, slot) in Square::all().zip(grid.iter_mut().flatten()) {
            *slot = self.board.cell(square);
        }
        grid
    }

    /// 終局しているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        self.is_over
    }

    /// 得点を返す。
    #[inline]
    #[must_use]
    pub const fn score(self) -> Score {
        self.score
    }
}

/// 1ゲームの盤面・手番・終局状態を管理する。
///
/// 盤面を変更するのは `apply_move`（と、それを包む `try_move`）と `reset` だけ。
/// 拒否された操作は状態を一切変えない。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GameEngine {
    /// 盤面。
    board: Board,
    /// 手番。
    current_player: Color,
    /// 終局フラグ。`reset` まで着手を拒否する。
    is_over: bool,
}

impl GameEngine {
    /// 先手の色。
    pub const FIRST_PLAYER: Color = Color::Black;

    /// 現手番で (x, y) に着手する。
    ///
    /// 成功時は石を置いて挟んだ石を反転し、手番を解決する：
    /// 相手が打てれば相手番、相手が打てず自分が打てればパス（自分番のまま）、
    /// どちらも打てなければ終局。盤面が埋まった場合も終局。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す（いずれも状態は変更しない）：
    /// - `EngineError::GameOver`: すでに終局している場合
    /// - `EngineError::OutOfBounds`: 座標が盤外の場合
    /// - `EngineError::IllegalMove`: 石がある、または1枚も返せない場合
    #[inline]
    pub fn apply_move(&mut self, x: u8, y: u8) -> Result<MoveOutcome, EngineError> {
        if self.is_over {
            debug!(x, y, reason = "game over", "move rejected");
            return Err(EngineError::GameOver);
        }

        let Some(square) = Square::from_xy(x, y) else {
            debug!(x, y, reason = "out of bounds", "move rejected");
            return Err(EngineError::OutOfBounds { x, y });
        };

        let color = self.current_player;
        let flipped = rules::compute_flips(self.board, square, color);
        if !self.board.cell(square).is_empty() || flipped.is_empty() {
            debug!(x, y, ?color, reason = "illegal", "move rejected");
            return Err(EngineError::IllegalMove { x, y });
        }

        self.board.put(square, Cell::from(color));
        for captured in flipped {
            self.board.put(captured, Cell::from(color));
        }
        debug!(x, y, ?color, flipped = flipped.len(), "move applied");

        let passed = self.resolve_turn(color);

        Ok(MoveOutcome {
            current_player: self.current_player,
            flipped,
            passed,
            placed: square,
            status: self.status(),
        })
    }

    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// (x, y) に `color` が打ったときに反転する石の集合を返す（盤面は変更しない）。
    ///
    /// # Errors
    ///
    /// 座標が盤外なら `EngineError::OutOfBounds` を返す。
    #[inline]
    pub fn compute_flips(&self, x: u8, y: u8, color: Color) -> Result<SquareSet, EngineError> {
        match Square::from_xy(x, y) {
            Some(square) => Ok(rules::compute_flips(self.board, square, color)),
            None => Err(EngineError::OutOfBounds { x, y }),
        }
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub const fn current_player(&self) -> Color {
        self.current_player
    }

    /// 任意の盤面から `to_move` の手番でゲームを組み立てる。
    ///
    /// `to_move` が打てない場合は着手後と同じ規則で手番・終局を解決する。
    #[inline]
    #[must_use]
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut engine = Self {
            board,
            current_player: to_move,
            is_over: false,
        };

        if engine.board.is_full() || rules::legal_moves(engine.board, to_move).is_empty() {
            engine.resolve_turn(to_move.opponent());
        }

        engine
    }

    /// (x, y) が `color` にとって合法手かを返す（盤外なら `false`）。
    #[inline]
    #[must_use]
    pub fn is_legal(&self, x: u8, y: u8, color: Color) -> bool {
        Square::from_xy(x, y).is_some_and(|square| rules::is_legal(self.board, square, color))
    }

    /// 終局しているかを返す。
    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.is_over
    }

    /// `color` の合法手の集合を返す（合法手の強調表示やパス判定に使う）。
    #[inline]
    #[must_use]
    pub fn legal_moves(&self, color: Color) -> SquareSet {
        rules::legal_moves(self.board, color)
    }

    /// 初期局面・黒番でゲームを開始する。
    #[inline]
    #[must_use]
    pub const fn new_game() -> Self {
        Self {
            board: Board::opening(),
            current_player: Self::FIRST_PLAYER,
            is_over: false,
        }
    }

    /// 初期局面へ戻す。
    #[inline]
    pub fn reset(&mut self) -> Snapshot {
        self.board.reset_to_opening();
        self.current_player = Self::FIRST_PLAYER;
        self.is_over = false;
        debug!("game reset");

        self.snapshot()
    }

    /// `mover` の着手直後の手番・終局を決める。パスが起きたら `true`。
    fn resolve_turn(&mut self, mover: Color) -> bool {
        let opponent = mover.opponent();
        let mut passed = false;

        if !rules::legal_moves(self.board, opponent).is_empty() {
            self.current_player = opponent;
        } else if !rules::legal_moves(self.board, mover).is_empty() {
            self.current_player = mover;
            passed = true;
            info!(passing = ?opponent, to_move = ?mover, "no legal move, turn passes");
        } else {
            self.is_over = true;
        }

        if self.board.is_full() {
            self.is_over = true;
        }

        if self.is_over {
            let score = self.score();
            info!(black = score.black, white = score.white, "game over");
            return false;
        }

        passed
    }

    /// 現在の得点を返す。
    #[inline]
    #[must_use]
    pub const fn score(&self) -> Score {
        Score::from_board(self.board)
    }

    /// 描画用のスナップショットを返す。
    #[inline]
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            current_player: self.current_player,
            is_over: self.is_over,
            score: self.score(),
        }
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Status {
        if self.is_over {
            let score = self.score();
            return Status::GameOver {
                black: score.black,
                white: score.white,
            };
        }

        Status::InProgress
    }

    /// (x, y) への着手を試み、受理・拒否にかかわらず結果を返す。
    #[inline]
    pub fn try_move(&mut self, x: u8, y: u8) -> MoveResult {
        let (flipped, rejection) = match self.apply_move(x, y) {
            Ok(outcome) => (outcome.flipped, None),
            Err(err) => (SquareSet::EMPTY, Some(err)),
        };

        MoveResult {
            accepted: rejection.is_none(),
            current_player: self.current_player,
            flipped,
            is_over: self.is_over,
            rejection,
            score: self.score(),
        }
    }
}

impl Default for GameEngine {
    #[inline]
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::{GameEngine, Score, Status};
    use crate::engine::board::Board;
    use crate::engine::error::EngineError;
    use crate::engine::types::{Cell, Color, Square};

    fn board(text: &str) -> Board {
        text.parse::<Board>()
            .unwrap_or_else(|err| panic!("bad test board: {err}"))
    }

    #[test]
    fn new_game_starts_from_the_opening_with_black_to_move() {
        let engine = GameEngine::new_game();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.board(), Board::opening());
        assert_eq!(snapshot.current_player(), Color::Black);
        assert!(!snapshot.is_over());
        assert_eq!(engine.status(), Status::InProgress);
        assert_eq!(snapshot.score().black(), 2);
        assert_eq!(snapshot.score().white(), 2);
        assert_eq!(engine.legal_moves(Color::Black).len(), 4);
    }

    #[test]
    fn opening_capture_flips_exactly_one_stone() {
        let mut engine = GameEngine::new_game();
        let outcome = engine.apply_move(5, 3);
        assert!(outcome.is_ok(), "opening move rejected: {outcome:?}");

        let Ok(outcome) = outcome else { return };
        assert_eq!(Some(outcome.placed()), Square::from_xy(5, 3));
        let flipped: Vec<Square> = outcome.flipped().into_iter().collect();
        assert_eq!(flipped, Square::from_xy(4, 3).into_iter().collect::<Vec<_>>());
        assert_eq!(outcome.current_player(), Color::White);
        assert!(!outcome.passed());
        assert_eq!(outcome.status(), Status::InProgress);
        assert_eq!(engine.board().count(), (4, 1, 59));
    }

    #[test]
    fn rejected_moves_leave_the_engine_untouched() {
        let mut engine = GameEngine::new_game();
        let before = engine;

        // 空きだが相手石に隣接していない / 石がある / 盤外。
        assert_eq!(engine.apply_move(0, 0), Err(EngineError::IllegalMove { x: 0, y: 0 }));
        assert_eq!(engine.apply_move(3, 3), Err(EngineError::IllegalMove { x: 3, y: 3 }));
        assert_eq!(engine.apply_move(4, 3), Err(EngineError::IllegalMove { x: 4, y: 3 }));
        assert_eq!(engine.apply_move(8, 1), Err(EngineError::OutOfBounds { x: 8, y: 1 }));
        assert_eq!(engine, before);
    }

    #[test]
    fn try_move_rejection_is_repeatable() {
        let mut engine = GameEngine::new_game();
        let before = engine.snapshot();

        let first = engine.try_move(2, 2);
        for _attempt in 0..5 {
            assert_eq!(engine.try_move(2, 2), first);
        }

        assert!(!first.accepted());
        assert!(first.flipped().is_empty());
        assert_eq!(first.rejection(), Some(EngineError::IllegalMove { x: 2, y: 2 }));
        assert_eq!(first.current_player(), Color::Black);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn try_move_reports_accepted_moves() {
        let mut engine = GameEngine::new_game();
        let result = engine.try_move(4, 2);

        assert!(result.accepted());
        assert_eq!(result.rejection(), None);
        assert_eq!(result.flipped().len(), 1);
        assert_eq!(result.current_player(), Color::White);
        assert!(!result.is_over());
        assert_eq!(result.score().black(), 4);
        assert_eq!(result.score().white(), 1);
    }

    #[test]
    fn mover_keeps_the_turn_when_opponent_cannot_reply() {
        // 黒が (2, 0) を取ると、白に残るのは隅の黒石に寄せた (1, 7) だけで白は打てない。
        let position = board(
            "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            BW......
            ",
        );
        let mut engine = GameEngine::from_board(position, Color::Black);
        assert_eq!(engine.current_player(), Color::Black);

        let outcome = engine.apply_move(2, 0);
        assert!(outcome.is_ok(), "{outcome:?}");
        let Ok(outcome) = outcome else { return };

        assert!(outcome.passed());
        assert_eq!(outcome.current_player(), Color::Black);
        assert_eq!(engine.current_player(), Color::Black);
        assert!(engine.legal_moves(Color::White).is_empty());
        assert!(engine.is_legal(2, 7, Color::Black));
        assert!(!engine.is_over());
    }

    #[test]
    fn filling_the_board_ends_the_game_with_exact_score() {
        let mut text = "B".repeat(62);
        text.push_str("W.");
        let mut engine = GameEngine::from_board(board(&text), Color::Black);
        assert!(!engine.is_over());

        let outcome = engine.apply_move(7, 7);
        assert!(outcome.is_ok(), "{outcome:?}");

        assert!(engine.is_over());
        assert!(engine.board().is_full());
        assert_eq!(engine.status(), Status::GameOver { black: 64, white: 0 });
        assert_eq!(engine.score().winner(), Some(Color::Black));
        assert_eq!(engine.apply_move(0, 0), Err(EngineError::GameOver));
        assert_eq!(engine.try_move(0, 0).rejection(), Some(EngineError::GameOver));
    }

    #[test]
    fn neither_side_moving_ends_the_game() {
        // 黒が (2, 0) を取ると白石が消え、空きマスは残るが双方打てない。
        let position = board(
            "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let mut engine = GameEngine::from_board(position, Color::Black);

        let outcome = engine.apply_move(2, 0);
        assert!(outcome.is_ok(), "{outcome:?}");
        let Ok(outcome) = outcome else { return };

        assert!(!outcome.passed());
        assert_eq!(outcome.status(), Status::GameOver { black: 3, white: 0 });
        assert_eq!(engine.current_player(), Color::Black);
        assert!(!engine.board().is_full());
    }

    #[test]
    fn reset_returns_to_the_opening_after_game_over() {
        let mut engine = GameEngine::from_board(board(&"W".repeat(64)), Color::Black);
        assert!(engine.is_over());

        let snapshot = engine.reset();
        assert_eq!(snapshot, GameEngine::new_game().snapshot());
        assert_eq!(engine, GameEngine::default());
        assert!(engine.try_move(3, 5).accepted());
    }

    #[test]
    fn from_board_passes_when_side_to_move_is_stuck() {
        // 白番だが白は打てず、黒は打てる。
        let position = board(
            "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let engine = GameEngine::from_board(position, Color::White);

        assert_eq!(engine.current_player(), Color::Black);
        assert!(!engine.is_over());
    }

    #[test]
    fn snapshot_grid_is_indexed_by_row_then_column() {
        let snapshot = GameEngine::new_game().snapshot();
        let grid = snapshot.grid();

        assert_eq!(grid.get(3).and_then(|row| row.get(4)), Some(&Cell::White));
        assert_eq!(grid.get(4).and_then(|row| row.get(4)), Some(&Cell::Black));
        assert_eq!(snapshot.cell(4, 3), Ok(Cell::White));
        assert_eq!(snapshot.cell(9, 9), Err(EngineError::OutOfBounds { x: 9, y: 9 }));
    }

    #[test]
    fn out_of_range_queries_are_checked() {
        let engine = GameEngine::new_game();

        assert!(!engine.is_legal(200, 3, Color::Black));
        assert_eq!(
            engine.compute_flips(3, 8, Color::Black),
            Err(EngineError::OutOfBounds { x: 3, y: 8 })
        );
        assert_eq!(engine.compute_flips(2, 4, Color::Black).map(|set| set.len()), Ok(1));
    }

    #[test]
    fn score_reports_winner_and_margin() {
        let score = Score::from_board(board(&format!("{}{}", "B".repeat(30), "W".repeat(34))));

        assert_eq!(score.winner(), Some(Color::White));
        assert_eq!(score.margin(), 4);
        assert_eq!(Score::default().winner(), None);
    }
}
