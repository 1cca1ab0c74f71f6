//! UI描画モジュール

use crate::app::{App, Focus, LogView};
use crate::battle::{BattleResponse, Combatant};
use crate::config::BATTLE_ENDPOINT;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// 画面の区画（ヘッダ・フォーム・エラーバナー・結果・フッター）
fn screen_chunks(area: Rect, app: &App) -> [Rect; 5] {
    let banner_height = app.phase.error().map_or(0, |msg| banner_height(msg, area));

    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // ヘッダ
            Constraint::Length(3),             // フォーム
            Constraint::Length(banner_height), // エラーバナー
            Constraint::Min(0),                // 結果
            Constraint::Length(3),             // フッター
        ])
        .areas(area)
}

/// 結果パネル内の区画（勝者・最終状態・ログ見出し・ログ本文）
fn result_chunks(inner: Rect) -> [Rect; 4] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // 勝者・ターン数
            Constraint::Length(3), // 最終状態
            Constraint::Length(1), // ログ見出し
            Constraint::Min(0),    // ログ本文
        ])
        .areas(inner)
}

fn result_block() -> Block<'static> {
    Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

/// メインUI描画関数
pub fn render(f: &mut Frame, app: &App) {
    let [header, form, banner, result, footer] = screen_chunks(f.area(), app);

    render_header(f, header);
    render_form(f, app, form);
    if let Some(msg) = app.phase.error() {
        render_error(f, msg, banner);
    }
    if let Some(resp) = app.phase.response() {
        render_result(f, resp, app.log_view, app.focus == Focus::Log, result);
    }
    render_footer(f, footer);
}

/// 展開中のログ本文が描画される領域。結果がない・折りたたみ中なら `None`
pub fn log_viewport(area: Rect, app: &App) -> Option<Rect> {
    if app.phase.response().is_none() || !app.log_view.expanded {
        return None;
    }
    let [_, _, _, result, _] = screen_chunks(area, app);
    let [_, _, _, body] = result_chunks(result_block().inner(result));
    Some(body)
}

/// 画面サイズ `area` でログをスクロールできる最大行数（折り返し後の行で数える）
pub fn log_max_scroll(area: Rect, app: &App) -> u16 {
    let (Some(resp), Some(view)) = (app.phase.response(), log_viewport(area, app)) else {
        return 0;
    };
    let rows = log_paragraph(&resp.result.log).line_count(view.width);
    rows.saturating_sub(view.height as usize).min(u16::MAX as usize) as u16
}

/// ヘッダー部分を描画
fn render_header(f: &mut Frame, area: Rect) {
    let header = vec![
        Line::from("Pokemon Battle Simulator".bold()),
        Line::from("Enter two Pokémon names. Data is fetched from PokeAPI via your backend.".dark_gray()),
    ];
    f.render_widget(Paragraph::new(header), area);
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style)
        .title(title)
}

/// 入力欄と送信ボタンを描画
fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(19),
        ])
        .split(area);

    let inputs = [
        (Focus::Pokemon1, "Pokémon 1", app.form.pokemon1.as_str(), "e.g., pikachu"),
        (Focus::Pokemon2, "Pokémon 2", app.form.pokemon2.as_str(), "e.g., charizard"),
        (Focus::Level, "Level", app.form.level.as_str(), "50"),
    ];
    for (i, (focus, title, value, placeholder)) in inputs.into_iter().enumerate() {
        let focused = app.focus == focus;
        let line = if value.is_empty() && !focused {
            Line::from(placeholder.dark_gray())
        } else if focused {
            // 簡易カーソル表示
            Line::from(format!("{value}_"))
        } else {
            Line::from(value.to_string())
        };
        f.render_widget(Paragraph::new(line).block(focus_block(title, focused)), cols[i]);
    }

    let enabled = app.submit_enabled();
    let label = app.phase.button_label();
    let style = match (enabled, app.phase.is_submitting()) {
        (_, true) => Style::default().fg(Color::Black).bg(Color::LightGreen),
        (true, false) => Style::default().fg(Color::White).bg(Color::Green).bold(),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let button = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(focus_block("", app.focus == Focus::Submit));
    f.render_widget(button, cols[3]);
}

fn error_paragraph(msg: &str) -> Paragraph<'_> {
    Paragraph::new(msg)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
}

/// バナーの高さ（枠2行＋折り返し後の本文）。画面の半分を上限とする
fn banner_height(msg: &str, area: Rect) -> u16 {
    let text_rows = error_paragraph(msg).line_count(area.width.saturating_sub(2)).max(1);
    let wanted = (text_rows + 2).min(u16::MAX as usize) as u16;
    wanted.min((area.height / 2).max(3))
}

/// エラーバナーを描画
fn render_error(f: &mut Frame, msg: &str, area: Rect) {
    let banner = error_paragraph(msg).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightRed)),
    );
    f.render_widget(banner, area);
}

/// 結果パネルを描画
fn render_result(f: &mut Frame, resp: &BattleResponse, view: LogView, log_focused: bool, area: Rect) {
    let block = result_block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [summary_area, sides_area, heading_area, log_area] = result_chunks(inner);

    let summary = vec![
        Line::from(vec!["Winner: ".bold(), Span::raw(resp.result.winner.clone())]),
        Line::from(vec!["Turns: ".bold(), Span::raw(resp.result.turns.to_string())]),
    ];
    f.render_widget(Paragraph::new(summary), summary_area);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sides_area);
    render_combatant(f, &resp.result.final_state.p1, sides[0]);
    render_combatant(f, &resp.result.final_state.p2, sides[1]);

    let marker = if view.expanded { "▼" } else { "▶" };
    let mut summary_style = Style::default().fg(Color::Cyan);
    if log_focused {
        summary_style = summary_style.bold().underlined();
    }
    let heading = Paragraph::new(Line::styled(format!("{marker} Battle log"), summary_style));
    f.render_widget(heading, heading_area);

    if view.expanded {
        let log = log_paragraph(&resp.result.log);
        // 末尾より先へはスクロールさせない
        let max = log.line_count(log_area.width).saturating_sub(log_area.height as usize);
        let scroll = (view.scroll as usize).min(max) as u16;
        f.render_widget(log.scroll((scroll, 0)), log_area);
    }
}

fn render_combatant(f: &mut Frame, c: &Combatant, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(c.name.as_str(), Style::default().bold())),
        Line::from(format!("HP: {}", c.hp)),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// バトルログを1エントリ1行に変換（順序保持・省略なし）
pub fn battle_log_lines(log: &[String]) -> Vec<Line<'_>> {
    log.iter()
        .map(|entry| Line::from(vec![Span::raw("• "), Span::raw(entry.as_str())]))
        .collect()
}

/// 折り返し付きのログ本文。幅を越えるエントリは次の行へ送る
fn log_paragraph(log: &[String]) -> Paragraph<'_> {
    Paragraph::new(battle_log_lines(log)).wrap(Wrap { trim: false })
}

/// フッター部分を描画
fn render_footer(f: &mut Frame, area: Rect) {
    let footer = vec![
        Line::from(vec![
            Span::raw("Backend endpoints used: "),
            Span::styled(BATTLE_ENDPOINT, Style::default().fg(Color::Cyan)),
        ]),
        Line::from("Tab/Shift+Tab: move | Enter: submit | Esc: quit"),
        Line::from("↑/↓: level or scroll log | Enter/Space on log: open/close"),
    ];
    f.render_widget(Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)), area);
}
