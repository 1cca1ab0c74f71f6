//! アプリケーション設定と定数

use std::ops::RangeInclusive;
use std::time::Duration;

/// バトルシミュレータのエンドポイント
pub const BATTLE_ENDPOINT: &str = "/mcp/tools/battle_simulator";

/// 送信時に固定される最大ターン数
pub const MAX_TURNS: u32 = 200;

/// レベル入力欄の既定値
pub const DEFAULT_LEVEL: u32 = 50;

/// レベル入力欄の許容範囲
pub const LEVEL_RANGE: RangeInclusive<u32> = 1..=100;

/// 接続先の既定値（uvicorn のデフォルトポート）
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// バックエンドのベースURL（末尾スラッシュなし）
    pub base_url: String,
    /// リクエスト全体のタイムアウト。`None` なら無期限に待つ
    pub request_timeout: Option<Duration>,
    /// イベントポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            poll_interval_ms: 100,
        }
    }
}

impl Config {
    /// 新しい設定インスタンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数から設定を読み込む（未設定や不正値は既定値のまま）
    ///
    /// - `BATTLE_SIM_BASE_URL`
    /// - `BATTLE_SIM_TIMEOUT_SECS`
    /// - `BATTLE_SIM_POLL_MS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のルックアップ関数から設定を構築する
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup("BATTLE_SIM_BASE_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                cfg.base_url = url.to_string();
            }
        }

        match lookup("BATTLE_SIM_TIMEOUT_SECS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => cfg.request_timeout = Some(Duration::from_secs(secs)),
            Some(Err(e)) => tracing::warn!(target: "app", error = %e, "ignoring BATTLE_SIM_TIMEOUT_SECS"),
            _ => {}
        }

        match lookup("BATTLE_SIM_POLL_MS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(ms)) if ms > 0 => cfg.poll_interval_ms = ms,
            Some(Err(e)) => tracing::warn!(target: "app", error = %e, "ignoring BATTLE_SIM_POLL_MS"),
            _ => {}
        }

        cfg
    }

    /// 送信先URL
    pub fn battle_url(&self) -> String {
        format!("{}{}", self.base_url, BATTLE_ENDPOINT)
    }
}
