//! Stateless UI rendering for tic-tac-toe.

mod board;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_model::{KeyValueStore, Mode};

use crate::app::App;

/// Draws the whole screen for the current mode.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.view().mode {
        Mode::Start => draw_start(frame, chunks[1]),
        Mode::Game | Mode::Results => board::draw_board(frame, chunks[1], app.view(), app.cursor()),
    }

    draw_status(frame, chunks[2], app);

    let help = Paragraph::new(help_text(app.view().mode))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_start(frame: &mut Frame, area: Rect) {
    let button = Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from("Start as"),
        Line::from(""),
        Line::from(vec![
            Span::styled(" X ", button),
            Span::raw("   "),
            Span::styled(" O ", button),
        ]),
    ];
    let start = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(start, board::center_rect(area, 20, 3));
}

fn draw_status<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let (text, color) = match (app.notice(), app.view().mode) {
        (Some(notice), _) => (notice.to_string(), Color::Red),
        (None, Mode::Results) => (app.status(), Color::Green),
        (None, _) => (app.status(), Color::Yellow),
    };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn help_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Start => "x / o: pick player   q: quit",
        Mode::Game => "1-9 or arrows + enter: play   r: restart   q: quit",
        Mode::Results => "r: restart   q: quit",
    }
}
