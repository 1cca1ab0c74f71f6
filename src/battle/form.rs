//! 入力フォームの状態と送信可否の判定

use super::models::BattleRequest;
use crate::config::{DEFAULT_LEVEL, LEVEL_RANGE};

/// レベル欄に入力できる最大桁数
const LEVEL_MAX_DIGITS: usize = 3;

/// フォームの入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Pokemon1,
    Pokemon2,
    Level,
}

/// 2体の名前とレベルを保持するフォーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleForm {
    pub pokemon1: String,
    pub pokemon2: String,
    /// 数値欄の生テキスト。空なら既定レベル扱い
    pub level: String,
}

impl Default for BattleForm {
    fn default() -> Self {
        Self {
            pokemon1: "pikachu".to_string(),
            pokemon2: "charmander".to_string(),
            level: DEFAULT_LEVEL.to_string(),
        }
    }
}

impl BattleForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意の値でフォームを作る（主にテスト用途）
    pub fn with_values(pokemon1: &str, pokemon2: &str, level: &str) -> Self {
        Self {
            pokemon1: pokemon1.to_string(),
            pokemon2: pokemon2.to_string(),
            level: level.to_string(),
        }
    }

    /// 名前欄の検証: 両方とも空でなく、大文字小文字を無視して異なること
    pub fn names_valid(&self) -> bool {
        let a = self.pokemon1.trim();
        let b = self.pokemon2.trim();
        !a.is_empty() && !b.is_empty() && a.to_lowercase() != b.to_lowercase()
    }

    /// 現在のレベル値。空欄は既定値、範囲外や数値でなければ `None`
    pub fn level_value(&self) -> Option<u32> {
        let raw = self.level.trim();
        if raw.is_empty() {
            return Some(DEFAULT_LEVEL);
        }
        raw.parse::<u32>().ok().filter(|lv| LEVEL_RANGE.contains(lv))
    }

    /// 送信可能か
    pub fn can_submit(&self) -> bool {
        self.names_valid() && self.level_value().is_some()
    }

    /// 送信用リクエストを組み立てる。名前はトリムされる
    pub fn to_request(&self, max_turns: u32) -> Option<BattleRequest> {
        if !self.can_submit() {
            return None;
        }
        Some(BattleRequest {
            pokemon1: self.pokemon1.trim().to_string(),
            pokemon2: self.pokemon2.trim().to_string(),
            level: self.level_value()?,
            max_turns,
        })
    }

    /// 入力欄に1文字追加。レベル欄は数字のみ受け付ける
    pub fn push_char(&mut self, field: Field, ch: char) {
        match field {
            Field::Pokemon1 => self.pokemon1.push(ch),
            Field::Pokemon2 => self.pokemon2.push(ch),
            Field::Level => {
                if ch.is_ascii_digit() && self.level.len() < LEVEL_MAX_DIGITS {
                    self.level.push(ch);
                }
            }
        }
    }

    /// 入力欄の最後の文字を削除
    pub fn pop_char(&mut self, field: Field) {
        match field {
            Field::Pokemon1 => self.pokemon1.pop(),
            Field::Pokemon2 => self.pokemon2.pop(),
            Field::Level => self.level.pop(),
        };
    }

    /// 数値スピナー相当の増減。結果は常に範囲内に収まる
    pub fn step_level(&mut self, delta: i32) {
        let current = self
            .level
            .trim()
            .parse::<i64>()
            .unwrap_or(DEFAULT_LEVEL as i64);
        let lo = *LEVEL_RANGE.start() as i64;
        let hi = *LEVEL_RANGE.end() as i64;
        let next = (current + delta as i64).clamp(lo, hi);
        self.level = next.to_string();
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Pokemon1 => &self.pokemon1,
            Field::Pokemon2 => &self.pokemon2,
            Field::Level => &self.level,
        }
    }
}
