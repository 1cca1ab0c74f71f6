//! バトルシミュレータのHTTPクライアント
//!
//! 1回の呼び出しで `POST {base_url}/mcp/tools/battle_simulator` を1件送り、
//! 結果を `BattleResponse` か `SubmitError` のどちらかに落とし込む。

use crate::battle::{BattleRequest, BattleResponse};
use crate::client::SubmitError;
use crate::config::Config;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

pub struct BattleClient {
    client: Client,
    url: String,
}

impl BattleClient {
    /// 設定からクライアントを構築。失敗するのはTLSバックエンドの初期化時のみ
    pub fn new(config: &Config) -> Result<Self, SubmitError> {
        let mut builder = Client::builder().user_agent("battle_form/0.1");
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, url: config.battle_url() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// シミュレーションを1件リクエスト
    #[instrument(name = "simulate", skip(self), fields(p1 = %req.pokemon1, p2 = %req.pokemon2, level = req.level))]
    pub async fn simulate(&self, req: &BattleRequest) -> Result<BattleResponse, SubmitError> {
        info!(target: "client", url = %self.url, "battle_request");
        // .json() が Content-Type: application/json を付ける
        let resp = self.client.post(&self.url).json(req).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(target: "client", status = %status, len = body.len(), "battle_response_raw");

        decode_response(status.as_u16(), &body)
    }
}

/// ステータスコードと本文テキストを送信結果に変換
pub fn decode_response(status: u16, body: &str) -> Result<BattleResponse, SubmitError> {
    if !(200..300).contains(&status) {
        warn!(target: "client", status, "battle_request_failed");
        return Err(SubmitError::Status { status, body: body.to_string() });
    }
    serde_json::from_str(body).map_err(|e| {
        warn!(target: "client", error = %e, "battle_response_decode_failed");
        SubmitError::Decode(e.to_string())
    })
}
