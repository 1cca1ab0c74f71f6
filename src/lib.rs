
// 同階層のファイルをモジュールとしてインポート
pub mod config;
pub mod battle; // フォーム・状態機械・ワイヤ型
pub mod client; // HTTPクライアントと送信ワーカー
pub mod app;
pub mod event;
pub mod ui;

pub use app::App;
pub use config::Config;

use color_eyre::Result;
use crossterm::event::{self as crossterm_event, Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use std::time::Duration;

// Ensure .env is loaded for tests before anything else runs in the test process.
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}

/// アプリケーションのメインループを実行
pub fn run(mut terminal: DefaultTerminal, config: Config) -> Result<()> {
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    tracing::info!(target: "app", base_url = %config.base_url, "starting");
    let mut app = App::with_config(config);

    loop {
        // ワーカーからの結果を非ブロッキングで反映
        app.check_response();

        // 展開中のログは現在の画面幅で折り返した行数をスクロール上限にする
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        if ui::log_viewport(area, &app).is_some() {
            app.fit_log(ui::log_max_scroll(area, &app));
        }

        // 画面を描画
        terminal.draw(|f| ui::render(f, &app))?;

        // poll_interval 以内にイベントが来たら処理
        if crossterm_event::poll(poll_interval)? {
            match crossterm_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if event::handle_key(&mut app, key)? {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // 次ループで再描画されるので特別な処理なし
                }
                _ => {}
            }
        }
    }
    tracing::info!(target: "app", elapsed_s = app.elapsed_time().as_secs_f32(), "exiting");
    Ok(())
}
