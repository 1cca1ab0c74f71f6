//! 送信サイクルの状態機械
//!
//! Idle → Submitting → {Succeeded, Failed} → (次の送信で) Submitting

use super::models::BattleResponse;
use crate::client::SubmitError;

/// 1回の送信サイクルにおけるフォームの状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded(BattleResponse),
    /// エラーバナーに表示する文字列
    Failed(String),
}

/// 状態遷移を起こすイベント
#[derive(Debug, Clone)]
pub enum SubmitEvent {
    Submitted,
    Resolved(Result<BattleResponse, SubmitError>),
}

impl Phase {
    /// reducer。受け付けないイベントでは状態を変えない
    pub fn next(self, event: SubmitEvent) -> Phase {
        match (self, event) {
            // 送信中の再送信は同じ状態に留まる（2件目は発行されない）
            (_, SubmitEvent::Submitted) => Phase::Submitting,
            (Phase::Submitting, SubmitEvent::Resolved(Ok(resp))) => Phase::Succeeded(resp),
            (Phase::Submitting, SubmitEvent::Resolved(Err(e))) => Phase::Failed(e.banner()),
            // 送信中でなければ届いた応答は古いものとして捨てる
            (other, SubmitEvent::Resolved(_)) => other,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Phase::Submitting)
    }

    pub fn response(&self) -> Option<&BattleResponse> {
        match self {
            Phase::Succeeded(resp) => Some(resp),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// 送信ボタンのラベル
    pub fn button_label(&self) -> &'static str {
        if self.is_submitting() { "Simulating…" } else { "Simulate Battle" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::models::{BattleRequest, BattleResult, Combatant, FinalState};

    fn sample_response() -> BattleResponse {
        BattleResponse {
            tool: "battle_simulator".into(),
            params: BattleRequest { pokemon1: "a".into(), pokemon2: "b".into(), level: 50, max_turns: 200 },
            result: BattleResult {
                winner: "a".into(),
                turns: 1,
                log: vec!["-- Turn 1 --".into()],
                final_state: FinalState {
                    p1: Combatant { name: "a".into(), hp: 10 },
                    p2: Combatant { name: "b".into(), hp: 0 },
                },
            },
        }
    }

    #[test]
    fn submit_then_success() {
        let phase = Phase::Idle.next(SubmitEvent::Submitted);
        assert!(phase.is_submitting());
        assert_eq!(phase.button_label(), "Simulating…");
        let phase = phase.next(SubmitEvent::Resolved(Ok(sample_response())));
        assert_eq!(phase.response().map(|r| r.result.winner.as_str()), Some("a"));
        assert_eq!(phase.button_label(), "Simulate Battle");
    }

    #[test]
    fn submit_then_failure_keeps_banner_text() {
        let err = SubmitError::Status { status: 400, body: "Invalid Pokémon name".into() };
        let phase = Phase::Idle
            .next(SubmitEvent::Submitted)
            .next(SubmitEvent::Resolved(Err(err)));
        assert_eq!(phase.error(), Some("Invalid Pokémon name"));
        assert!(phase.response().is_none());
    }

    #[test]
    fn resubmit_clears_previous_outcome() {
        let failed = Phase::Failed("boom".into());
        assert_eq!(failed.next(SubmitEvent::Submitted), Phase::Submitting);
        let done = Phase::Succeeded(sample_response());
        assert_eq!(done.next(SubmitEvent::Submitted), Phase::Submitting);
    }

    #[test]
    fn stale_reply_outside_submitting_is_ignored() {
        let phase = Phase::Idle.next(SubmitEvent::Resolved(Ok(sample_response())));
        assert_eq!(phase, Phase::Idle);
        let phase = Phase::Failed("x".into()).next(SubmitEvent::Resolved(Err(SubmitError::Decode("y".into()))));
        assert_eq!(phase, Phase::Failed("x".into()));
    }
}
