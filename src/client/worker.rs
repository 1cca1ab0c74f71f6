//! バトル送信ワーカー（TUIとは別スレッドで動く）
//!
//! UIスレッドから `BattleRequest` を受け取り、1件ずつ順番に送信して
//! 結果をそのまま送り返す。送信中は UI 側がボタンを無効化しているため、
//! 同時に処理されるリクエストは常に1件だけ。

use crate::battle::{BattleRequest, BattleResponse};
use crate::client::{BattleClient, SubmitError};
use crate::config::Config;
use std::sync::mpsc::{Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{error, info};

/// ワーカーから UI へ返す結果
pub type BattleOutcome = Result<BattleResponse, SubmitError>;

/// バトル送信ワーカーを開始
pub fn start_battle_worker(
    rx_request: Receiver<BattleRequest>,
    tx_outcome: Sender<BattleOutcome>,
    config: Config,
) {
    std::thread::spawn(move || {
        // 専用スレッド内でTokioランタイムを構築
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!(target: "worker", error = %e, "tokio_runtime_failed");
                drain_with_error(&rx_request, &tx_outcome, SubmitError::Transport(e.to_string()));
                return;
            }
        };
        let client = match BattleClient::new(&config) {
            Ok(c) => c,
            Err(e) => {
                error!(target: "worker", error = %e, "client_build_failed");
                drain_with_error(&rx_request, &tx_outcome, e);
                return;
            }
        };

        rt.block_on(async move {
            while let Ok(req) = rx_request.recv() {
                info!(target: "worker", p1 = %req.pokemon1, p2 = %req.pokemon2, "request_received");
                let outcome = client.simulate(&req).await;
                match &outcome {
                    Ok(resp) => info!(target: "worker", winner = %resp.result.winner, turns = resp.result.turns, "outcome_ready"),
                    Err(e) => info!(target: "worker", error = %e, "outcome_failed"),
                }
                // UI が終了していれば送信エラーは無視
                let _ = tx_outcome.send(outcome);
            }
        });
        info!(target: "worker", "request channel closed; worker exiting");
    });
}

/// 初期化失敗時: 以後のリクエストすべてに同じエラーを返す
fn drain_with_error(rx: &Receiver<BattleRequest>, tx: &Sender<BattleOutcome>, err: SubmitError) {
    while rx.recv().is_ok() {
        let _ = tx.send(Err(err.clone()));
    }
}
