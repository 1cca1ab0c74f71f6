use serde::{Deserialize, Serialize};

/// POST /mcp/tools/battle_simulator のリクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRequest {
    pub pokemon1: String,
    pub pokemon2: String,
    pub level: u32,
    pub max_turns: u32,
}

/// バトルシミュレータの応答。`tool` と `params` は表示せずそのまま保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResponse {
    pub tool: String,
    pub params: BattleRequest,
    pub result: BattleResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: String,
    pub turns: u32,
    pub log: Vec<String>,
    pub final_state: FinalState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalState {
    pub p1: Combatant,
    pub p2: Combatant,
}

/// 決着時点の残りHP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub hp: i64,
}
