use battle_form::app::App;
use battle_form::battle::{BattleRequest, BattleResponse, BattleResult, Combatant, FinalState, Phase};
use battle_form::client::BattleOutcome;
use battle_form::config::Config;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::mpsc::channel;

fn long_battle() -> BattleResponse {
    BattleResponse {
        tool: "battle_simulator".into(),
        params: BattleRequest { pokemon1: "snorlax".into(), pokemon2: "chansey".into(), level: 100, max_turns: 200 },
        result: BattleResult {
            winner: "draw".into(),
            turns: 200,
            log: (1..=200).map(|t| format!("-- Turn {t} -- Snorlax used Body Slam! It dealt 12 damage.")).collect(),
            final_state: FinalState {
                p1: Combatant { name: "snorlax".into(), hp: 120 },
                p2: Combatant { name: "chansey".into(), hp: 88 },
            },
        },
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let (tx_req, _rx_req) = channel::<BattleRequest>();
    let (_tx_out, rx_out) = channel::<BattleOutcome>();
    let mut app = App::with_channels(Config::new(), tx_req, rx_out);
    app.phase = Phase::Succeeded(long_battle());
    app.toggle_log();

    let mut terminal = Terminal::new(TestBackend::new(120, 60)).expect("terminal");
    c.bench_function("render 200-turn result", |b| {
        b.iter(|| {
            terminal.draw(|f| battle_form::ui::render(f, black_box(&app))).expect("draw");
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
