//! アプリケーション状態管理モジュール

use crate::battle::{BattleForm, BattleRequest, Field, Phase, SubmitEvent};
use crate::client::{self, BattleOutcome, SubmitError};
use crate::config::{Config, MAX_TURNS};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;
use tracing::{info, warn};

/// フォーカス可能な要素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Pokemon1,
    Pokemon2,
    Level,
    Submit,
    /// 結果パネルのログ見出し（結果がある時のみ）
    Log,
}

impl Focus {
    /// 入力欄ならフォームの欄を返す
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Pokemon1 => Some(Field::Pokemon1),
            Focus::Pokemon2 => Some(Field::Pokemon2),
            Focus::Level => Some(Field::Level),
            Focus::Submit | Focus::Log => None,
        }
    }
}

/// 折りたたみ可能なバトルログの表示状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogView {
    pub expanded: bool,
    /// 先頭から何行スクロールしているか（折り返し後の行単位）
    pub scroll: u16,
    /// 直近の描画で測ったスクロール上限。未計測なら `None`
    pub max_scroll: Option<u16>,
}

/// アプリケーションの状態を管理する構造体
pub struct App {
    pub form: BattleForm,
    pub phase: Phase,
    pub focus: Focus,
    pub log_view: LogView,
    pub config: Config,
    /// アプリケーション開始時刻
    pub started: Instant,
    /// リクエスト送信用チャンネル
    pub tx: Sender<BattleRequest>,
    /// 結果受信用チャンネル
    pub rx: Receiver<BattleOutcome>,
}

impl App {
    /// 新しいアプリケーションインスタンスを作成
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    /// 設定を指定してアプリケーションインスタンスを作成（ワーカーも起動する）
    pub fn with_config(config: Config) -> Self {
        let (tx_request, rx_request) = mpsc::channel::<BattleRequest>();
        let (tx_outcome, rx_outcome) = mpsc::channel::<BattleOutcome>();

        client::start_battle_worker(rx_request, tx_outcome, config.clone());

        Self::with_channels(config, tx_request, rx_outcome)
    }

    /// ワーカーを起動せず、外部から渡したチャンネルで構築する
    pub fn with_channels(config: Config, tx: Sender<BattleRequest>, rx: Receiver<BattleOutcome>) -> Self {
        Self {
            form: BattleForm::new(),
            phase: Phase::Idle,
            focus: Focus::Pokemon1,
            log_view: LogView::default(),
            config,
            started: Instant::now(),
            tx,
            rx,
        }
    }

    /// 送信ボタンが押せるか
    pub fn submit_enabled(&self) -> bool {
        self.form.can_submit() && !self.phase.is_submitting()
    }

    /// フォームを送信。実際にリクエストを発行したら `true`
    pub fn submit(&mut self) -> bool {
        if !self.submit_enabled() {
            return false;
        }
        let Some(req) = self.form.to_request(MAX_TURNS) else {
            return false;
        };
        info!(target: "app", p1 = %req.pokemon1, p2 = %req.pokemon2, level = req.level, "submit");
        if let Err(e) = self.tx.send(req) {
            // ワーカー不在は即座に送信失敗
            warn!(target: "app", error = %e, "worker channel closed");
            self.transition(SubmitEvent::Submitted);
            self.transition(SubmitEvent::Resolved(Err(SubmitError::Transport(String::new()))));
            return false;
        }
        self.transition(SubmitEvent::Submitted);
        true
    }

    /// ワーカーからの結果をチェックして更新
    pub fn check_response(&mut self) {
        if let Ok(outcome) = self.rx.try_recv() {
            match &outcome {
                Ok(resp) => info!(target: "app", winner = %resp.result.winner, log_len = resp.result.log.len(), "battle_received"),
                Err(e) => info!(target: "app", error = %e, "battle_failed"),
            }
            self.transition(SubmitEvent::Resolved(outcome));
        }
    }

    fn transition(&mut self, event: SubmitEvent) {
        let phase = std::mem::take(&mut self.phase);
        self.phase = phase.next(event);
        // 新しい結果のたびにログは折りたたみ直す
        self.log_view = LogView::default();
    }

    pub fn push_char(&mut self, ch: char) {
        if let Some(field) = self.focus.field() {
            self.form.push_char(field, ch);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.focus.field() {
            self.form.pop_char(field);
        }
    }

    /// 現在フォーカス可能な要素の並び
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Pokemon1, Focus::Pokemon2, Focus::Level, Focus::Submit];
        if self.phase.response().is_some() {
            order.push(Focus::Log);
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + order.len() - 1) % order.len()];
    }

    /// ログの開閉
    pub fn toggle_log(&mut self) {
        if self.phase.response().is_some() {
            self.log_view.expanded = !self.log_view.expanded;
            self.log_view.scroll = 0;
            self.log_view.max_scroll = None;
        }
    }

    /// 描画領域で測ったスクロール上限を反映し、現在位置をその範囲に収める
    pub fn fit_log(&mut self, max_scroll: u16) {
        self.log_view.max_scroll = Some(max_scroll);
        self.log_view.scroll = self.log_view.scroll.min(max_scroll);
    }

    /// 展開中のログをスクロール。末尾を越えない
    ///
    /// 上限は `fit_log` で測った折り返し後の行数。未計測の間はエントリ数で抑える
    pub fn scroll_log(&mut self, delta: i32) {
        let Some(resp) = self.phase.response() else { return };
        if !self.log_view.expanded {
            return;
        }
        let max = match self.log_view.max_scroll {
            Some(rows) => rows as i32,
            None => resp.result.log.len().saturating_sub(1).min(u16::MAX as usize) as i32,
        };
        let next = (self.log_view.scroll as i32 + delta).clamp(0, max);
        self.log_view.scroll = next as u16;
    }

    /// アプリケーション開始からの経過時間を取得
    pub fn elapsed_time(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
