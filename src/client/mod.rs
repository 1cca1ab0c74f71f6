//! バックエンド連携のモジュール

pub mod error;
pub mod http;
pub mod worker;

// 代表的な公開APIを再エクスポート
pub use error::{SubmitError, GENERIC_ERROR_MESSAGE};
pub use http::{decode_response, BattleClient};
pub use worker::{start_battle_worker, BattleOutcome};
