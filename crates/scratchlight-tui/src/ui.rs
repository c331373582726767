//! Rendering for the Scratchlight TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use scratchlight_core::build_info;
use scratchlight_core::snippet::SpotlightFrame;
use scratchlight_core::spotlight::SpotlightDisplay;

use crate::app::{App, Focus};

/// Shown in the spotlight area while no rotation is active.
const PLACEHOLDER: &str = "Clips will appear here once you scratch the wiki.";

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // input row
            Constraint::Length(3), // current term
            Constraint::Length(4), // spotlight
            Constraint::Length(3), // status bar
            Constraint::Min(3),    // log strip
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_inputs(frame, chunks[1], app);
    render_center_word(frame, chunks[2], app);
    render_spotlight(frame, chunks[3], app);
    render_status(frame, chunks[4], app);
    render_logs(frame, chunks[5], app);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(format!("Scratchlight {}", build_info::version_string()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_inputs(frame: &mut Frame, area: Rect, app: &App) {
    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(24), Constraint::Length(12)])
        .split(area);

    let term = Paragraph::new(app.term_input.as_str())
        .block(field_block(Focus::Term, app.focus));
    frame.render_widget(term, fields[0]);

    let limit = Paragraph::new(app.limit_input.as_str())
        .block(field_block(Focus::Limit, app.focus));
    frame.render_widget(limit, fields[1]);
}

fn field_block(field: Focus, focused: Focus) -> Block<'static> {
    let mut block = Block::default()
        .title(format!(" {} ", field.title()))
        .borders(Borders::ALL);
    if field == focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn render_center_word(frame: &mut Frame, area: Rect, app: &App) {
    let word = center_word_text(&app.current_term);
    let paragraph = Paragraph::new(word)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(paragraph, area);
}

/// The big center word: the active term, or a prompt when there is none.
fn center_word_text(current_term: &str) -> &str {
    if current_term.is_empty() {
        "Type a word"
    } else {
        current_term
    }
}

fn render_spotlight(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Spotlight ").borders(Borders::ALL);
    let paragraph = match &app.display {
        SpotlightDisplay::Placeholder => {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        }
        SpotlightDisplay::Frame(spot) => {
            Paragraph::new(spotlight_line(spot)).alignment(Alignment::Center)
        }
    };
    frame.render_widget(paragraph.block(block), area);
}

/// Lay a frame out as dim left context, highlighted word, dim right context.
fn spotlight_line(frame: &SpotlightFrame) -> Line<'static> {
    let mut spans = Vec::with_capacity(5);
    let context = Style::default().fg(Color::DarkGray);

    if !frame.left.is_empty() {
        spans.push(Span::styled(frame.left.clone(), context));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        frame.word.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));
    if !frame.right.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(frame.right.clone(), context));
    }

    Line::from(spans)
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, area);
}

fn render_logs(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .logs
        .recent(visible.max(1))
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                format!(
                    "{:>8.1}s {:<5} {}",
                    line.elapsed_secs, line.level, line.message
                ),
                Style::default().fg(Color::DarkGray),
            ))
        })
        .collect();

    let logs = Paragraph::new(lines).block(Block::default().title(" Log ").borders(Borders::ALL));
    frame.render_widget(logs, area);
}
