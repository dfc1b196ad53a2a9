/// 盤面（マスごとの占有状態）の実装。
pub mod board;
/// エラー型。
pub mod error;
/// ゲーム進行（手番、パス、終局判定）の実装。
pub mod game;
/// 反転計算と合法手生成。
pub mod rules;
/// マスの集合。
pub mod square_set;
/// 色・マス・座標の基本型。
pub mod types;

pub type Board = board::Board;
pub type Cell = types::Cell;
pub type Color = types::Color;
pub type Direction = rules::Direction;
pub type EngineError = error::EngineError;
pub type GameEngine = game::GameEngine;
pub type GameStatus = game::Status;
pub type MoveOutcome = game::MoveOutcome;
pub type MoveResult = game::MoveResult;
pub type ParseBoardError = error::ParseBoardError;
pub type Score = game::Score;
pub type Snapshot = game::Snapshot;
pub type Square = types::Square;
pub type SquareSet = square_set::SquareSet;
