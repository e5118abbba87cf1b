use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use sudoku_engine::Difficulty;

use crate::game::{Game, Screen, Severity};

// ── Constants ────────────────────────────────────────────────────────────────

/// Each cell is 2 chars wide ("5 "); 9 cells + 4 borders with padding = 25.
const GRID_WIDTH: u16 = 25;

/// 9 cell rows + 4 horizontal border lines.
const GRID_HEIGHT: u16 = 13;

// ── Public entry point ───────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, game: &Game) {
    match game.screen {
        Screen::Menu => draw_menu(f, game),
        Screen::Playing | Screen::Won => draw_playing(f, game),
    }

    if game.screen == Screen::Won {
        draw_won(f, game);
    }

    if game.show_quit_confirm {
        draw_quit_confirm(f);
    }
}

// ── Menu screen ──────────────────────────────────────────────────────────────

fn draw_menu(f: &mut Frame, game: &Game) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Min(0),
    ])
    .split(center_rect(50, 20, area));

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "S U D O K U",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "a terminal puzzle",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let selector_line = Line::from(vec![
        Span::styled("◄  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  {}  ", game.difficulty.label()),
            Style::default()
                .fg(difficulty_color(game.difficulty))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ►", Style::default().fg(Color::DarkGray)),
    ]);
    let selector = Paragraph::new(vec![
        Line::from(Span::styled(
            "Select Difficulty",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        selector_line,
    ])
    .alignment(Alignment::Center);
    f.render_widget(selector, chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::styled("  Change difficulty", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled("  Start game", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::styled("  Quit", Style::default().fg(Color::Gray)),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[5]);
}

// ── Playing screen ───────────────────────────────────────────────────────────

fn draw_playing(f: &mut Frame, game: &Game) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(GRID_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    let grid_area = center_rect(GRID_WIDTH, GRID_HEIGHT, chunks[1]);
    draw_grid(f, game, grid_area);

    let difficulty = game.session.difficulty();
    let status = Line::from(vec![
        Span::styled("Difficulty: ", Style::default().fg(Color::Gray)),
        Span::styled(
            difficulty.label(),
            Style::default()
                .fg(difficulty_color(difficulty))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("    Time: ", Style::default().fg(Color::Gray)),
        Span::styled(
            game.format_time(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[2],
    );

    draw_message(f, game, chunks[3]);
    draw_key_hints(f, chunks[5]);
}

// ── Grid rendering ───────────────────────────────────────────────────────────

fn draw_grid(f: &mut Frame, game: &Game, area: Rect) {
    let mut lines: Vec<Line> = Vec::with_capacity(GRID_HEIGHT as usize);

    lines.push(border_line('╔', '╦', '╗'));
    for row in 0..9 {
        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled("║ ", Style::default().fg(Color::White)));
        for col in 0..9 {
            spans.push(cell_span(game, row, col));
            spans.push(Span::raw(" "));
            if col % 3 == 2 && col != 8 {
                spans.push(Span::styled("║ ", Style::default().fg(Color::White)));
            }
        }
        spans.push(Span::styled("║", Style::default().fg(Color::White)));
        lines.push(Line::from(spans));

        if row % 3 == 2 && row != 8 {
            lines.push(border_line('╠', '╬', '╣'));
        }
    }
    lines.push(border_line('╚', '╩', '╝'));

    f.render_widget(Paragraph::new(lines), area);
}

fn cell_span(game: &Game, row: usize, col: usize) -> Span<'static> {
    let value = game.session.working(row, col);
    let is_selected = row == game.selected_row && col == game.selected_col;
    let is_given = game.session.is_given(row, col);
    let is_hint = game.hint_cell == Some((row, col));
    let is_conflict = game.conflicts.contains(&(row, col));

    let text = if value == 0 {
        "·".to_string()
    } else {
        value.to_string()
    };

    let mut style = if is_given {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if value == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    if !is_given && value != 0 {
        if game.show_check {
            style = if game.session.is_correct(row, col) {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
        } else if is_conflict {
            style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        }
    }

    if is_hint {
        style = Style::default().fg(Color::Black).bg(Color::Green);
    }
    if is_selected {
        style = style.bg(Color::Yellow).fg(Color::Black);
    }

    Span::styled(text, style)
}

fn border_line(left: char, cross: char, right: char) -> Line<'static> {
    let mut s = String::with_capacity(GRID_WIDTH as usize);
    s.push(left);
    for box_idx in 0..3 {
        s.push_str("═══════");
        if box_idx < 2 {
            s.push(cross);
        }
    }
    s.push(right);
    Line::from(Span::styled(s, Style::default().fg(Color::White)))
}

// ── Message banner ───────────────────────────────────────────────────────────

fn draw_message(f: &mut Frame, game: &Game, area: Rect) {
    let Some(msg) = &game.message else {
        return;
    };

    let color = match msg.severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            msg.text.clone(),
            Style::default().fg(color),
        )))
        .alignment(Alignment::Center),
        area,
    );
}

// ── Key hints ────────────────────────────────────────────────────────────────

fn draw_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("1-9", Style::default().fg(Color::Yellow)),
        Span::styled(" place  ", Style::default().fg(Color::DarkGray)),
        Span::styled("0/Del", Style::default().fg(Color::Yellow)),
        Span::styled(" erase  ", Style::default().fg(Color::DarkGray)),
        Span::styled("c", Style::default().fg(Color::Yellow)),
        Span::styled(" check  ", Style::default().fg(Color::DarkGray)),
        Span::styled("h", Style::default().fg(Color::Yellow)),
        Span::styled(" hint  ", Style::default().fg(Color::DarkGray)),
        Span::styled("x", Style::default().fg(Color::Yellow)),
        Span::styled(" clear  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::styled(" reset  ", Style::default().fg(Color::DarkGray)),
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::styled(" new  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
}

// ── Won screen ───────────────────────────────────────────────────────────────

fn draw_won(f: &mut Frame, game: &Game) {
    let area = f.area();
    let popup = center_rect(42, 9, area);

    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Solved! ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Green));

    let difficulty = game.session.difficulty();
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Congratulations!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(Color::Gray)),
            Span::styled(
                difficulty.label(),
                Style::default().fg(difficulty_color(difficulty)),
            ),
            Span::styled("   Time: ", Style::default().fg(Color::Gray)),
            Span::styled(game.format_time(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter for menu, Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

// ── Quit confirmation dialog ─────────────────────────────────────────────────

fn draw_quit_confirm(f: &mut Frame) {
    let area = f.area();
    let popup = center_rect(36, 7, area);

    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Quit? ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Red));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("/", Style::default().fg(Color::Gray)),
            Span::styled("Enter", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" Yes   ", Style::default().fg(Color::Gray)),
            Span::styled("Any key", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" No", Style::default().fg(Color::Gray)),
        ]),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

// ── Layout helpers ───────────────────────────────────────────────────────────

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area);

    let horiz = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(vert[1]);

    horiz[1]
}
