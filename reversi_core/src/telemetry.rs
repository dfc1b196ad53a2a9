use core::fmt;
use core::str::FromStr;
use std::env;

use tracing::Level;

/// ログ形式を指定する環境変数。
pub const FORMAT_ENV: &str = "REVERSI_LOG_FORMAT";

/// ログの最大レベルを指定する環境変数。
pub const LEVEL_ENV: &str = "REVERSI_LOG_LEVEL";

/// ログ出力形式。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum LogFormat {
    /// 1行に詰めた人間向け形式。
    #[default]
    Compact,
    /// `tracing-subscriber` 既定の形式。
    Full,
    /// 1イベント1行の JSON。
    Json,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            "json" => Ok(Self::Json),
            _ => Err(TelemetryError::UnknownFormat),
        }
    }
}

/// ログ初期化の設定。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    /// 出力形式。
    format: LogFormat,
    /// 出力する最大レベル。
    level: Level,
    /// `cargo test` の出力キャプチャへ書くか。
    test_writer: bool,
}

impl LogConfig {
    /// 出力形式を返す。
    #[inline]
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }

    /// `REVERSI_LOG_FORMAT` / `REVERSI_LOG_LEVEL` から設定を読む。
    ///
    /// 未設定や解釈できない値は既定値（`Compact` / `INFO`）にする。
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 変数名から値を引く `lookup` を使って設定を読む（`from_env` の本体）。
    ///
    /// 未設定や解釈できない値は既定値（`Compact` / `INFO`）にする。
    #[inline]
    #[must_use]
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let format = lookup(FORMAT_ENV)
            .and_then(|value| value.parse::<LogFormat>().ok())
            .unwrap_or_default();
        let level = lookup(LEVEL_ENV)
            .and_then(|value| value.trim().parse::<Level>().ok())
            .unwrap_or(Level::INFO);

        Self::new(format, level)
    }

    /// 出力する最大レベルを返す。
    #[inline]
    #[must_use]
    pub const fn level(self) -> Level {
        self.level
    }

    /// 形式とレベルを指定して生成する。
    #[inline]
    #[must_use]
    pub const fn new(format: LogFormat, level: Level) -> Self {
        Self {
            format,
            level,
            test_writer: false,
        }
    }

    /// 出力先をテストハーネスのキャプチャに切り替える。
    #[inline]
    #[must_use]
    pub const fn with_test_writer(self) -> Self {
        Self {
            format: self.format,
            level: self.level,
            test_writer: true,
        }
    }
}

impl Default for LogConfig {
    #[inline]
    fn default() -> Self {
        Self::new(LogFormat::default(), Level::INFO)
    }
}

/// ログ初期化に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TelemetryError {
    /// グローバルな subscriber がすでに設定されている。
    AlreadyInitialized,
    /// 未知のログ形式名。
    UnknownFormat,
}

impl fmt::Display for TelemetryError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::AlreadyInitialized => {
                formatter.write_str("a global tracing subscriber is already set")
            }
            Self::UnknownFormat => {
                formatter.write_str("log format must be one of compact, full, json")
            }
        }
    }
}

impl core::error::Error for TelemetryError {}

/// `config` に従ってグローバルな `fmt` subscriber を設定する。
///
/// # Errors
///
/// すでに subscriber が設定済みなら `TelemetryError::AlreadyInitialized` を返す。
#[inline]
pub fn init(config: LogConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt().with_max_level(config.level);

    let installed = match (config.format, config.test_writer) {
        (LogFormat::Compact, false) => builder.compact().try_init(),
        (LogFormat::Compact, true) => builder.compact().with_test_writer().try_init(),
        (LogFormat::Full, false) => builder.try_init(),
        (LogFormat::Full, true) => builder.with_test_writer().try_init(),
        (LogFormat::Json, false) => builder.json().try_init(),
        (LogFormat::Json, true) => builder.json().with_test_writer().try_init(),
    };

    installed.map_err(|_err| TelemetryError::AlreadyInitialized)
}
