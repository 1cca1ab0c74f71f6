//! 送信エラーの分類

use thiserror::Error;

/// 例外時の汎用メッセージ
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// 1回の送信で起こり得るエラー。いずれもバナー用の1行文字列に落とし込まれる
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// 接続失敗など、応答が得られなかった
    #[error("transport error: {0}")]
    Transport(String),
    /// 2xx 以外のステータス
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
    /// 応答ボディがJSONとして解釈できない
    #[error("decode error: {0}")]
    Decode(String),
}

impl SubmitError {
    /// エラーバナーに表示する文字列
    pub fn banner(&self) -> String {
        match self {
            SubmitError::Transport(msg) => {
                // 原因チェーンは載せず先頭行だけ
                let first = msg.lines().next().unwrap_or("").trim();
                if first.is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    first.to_string()
                }
            }
            SubmitError::Status { status, body } => {
                if body.is_empty() {
                    format!("Request failed: {status}")
                } else {
                    body.clone()
                }
            }
            SubmitError::Decode(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        // Display は最上位のメッセージのみ（source は含まない）
        SubmitError::Transport(e.to_string())
    }
}
