//! Reversi (Othello) rules engine.
//!
//! 盤面・合法手・反転・手番/終局の状態遷移を提供する `engine` と、
//! ログ出力の初期化を行う `telemetry` から成ります。
//! 描画や入力処理は利用側（プレゼンテーション層）の責務です。

#![forbid(unsafe_code)]

/// 盤面・ルール・ゲーム進行を提供するモジュール。
pub mod engine;

/// `tracing` のログ出力設定。
pub mod telemetry;
