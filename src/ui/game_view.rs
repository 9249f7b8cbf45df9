use crate::game::{Board, Cell, Side, COLS, ROWS};
use crate::session::Session;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    session: &Session,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Scoreboard
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(
        frame,
        session.state().board(),
        &session.highlighted_cells(),
        selected_column,
        chunks[1],
    );
    render_scoreboard(frame, session, chunks[2]);
    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn side_color(side: Side) -> Color {
    match side {
        Side::X => Color::Red,
        Side::O => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let state = session.state();
    let seat = session.current_seat();
    let side = state.current_side();

    let (status, color) = if state.is_terminal() {
        (format!("Round {}  |  Game Over", state.round()), Color::White)
    } else {
        (
            format!(
                "Round {}  |  {} to move: {}",
                state.round(),
                side,
                seat.label()
            ),
            side_color(side),
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    highlighted: &[(usize, usize)],
    selected_column: usize,
    area: Rect,
) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    // Top row first
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, mut style) = match board.get(row, col) {
                Cell::Empty => (" . ", Style::default().fg(Color::DarkGray)),
                Cell::X => (" ● ", Style::default().fg(side_color(Side::X))),
                Cell::O => (" ● ", Style::default().fg(side_color(Side::O))),
            };
            if highlighted.contains(&(row, col)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_scoreboard(frame: &mut Frame, session: &Session, area: Rect) {
    let widget = Paragraph::new(session.stats_line())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));

    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter/1-7: Drop  |  R: New game  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
