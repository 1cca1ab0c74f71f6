//! イベント処理モジュール

use crate::app::{App, Focus};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// ログを PageUp/PageDown で動かす行数
const PAGE_LINES: i32 = 10;

/// キーイベントを処理
///
/// # Returns
/// - `Ok(true)` - アプリケーションを終了
/// - `Ok(false)` - 処理を継続
/// - `Err(_)` - エラーが発生
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Enter => match app.focus {
            Focus::Log => app.toggle_log(),
            // 入力欄でのEnterもフォーム送信
            _ => {
                app.submit();
            }
        },
        KeyCode::Char(' ') if app.focus == Focus::Log => app.toggle_log(),
        KeyCode::Char(' ') if app.focus == Focus::Submit => {
            app.submit();
        }
        KeyCode::Up => match app.focus {
            Focus::Level => app.form.step_level(1),
            Focus::Log => app.scroll_log(-1),
            _ => {}
        },
        KeyCode::Down => match app.focus {
            Focus::Level => app.form.step_level(-1),
            Focus::Log => app.scroll_log(1),
            _ => {}
        },
        KeyCode::PageUp if app.focus == Focus::Log => app.scroll_log(-PAGE_LINES),
        KeyCode::PageDown if app.focus == Focus::Log => app.scroll_log(PAGE_LINES),
        KeyCode::Home if app.focus == Focus::Log => app.scroll_log(i32::MIN / 2),
        KeyCode::End if app.focus == Focus::Log => app.scroll_log(i32::MAX / 2),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            // 通常の文字入力
            app.push_char(ch);
        }
        _ => {}
    }
    Ok(false)
}
