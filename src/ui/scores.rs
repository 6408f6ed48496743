use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::{
    app::{App, AppState},
    leaderboard::ScoreRecord,
};

/// Pure presenter for one ranked leaderboard row
pub fn present_row(position: usize, record: &ScoreRecord) -> Row<'static> {
    let medal = match position {
        1 => Color::Yellow,
        2 => Color::White,
        3 => Color::LightRed,
        _ => Color::Reset,
    };

    Row::new(vec![
        Cell::from(format!("{position:>2}.")).style(Style::default().fg(medal)),
        Cell::from(record.name.clone()),
        Cell::from(record.score.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(record.mode.to_string()),
        Cell::from(record.timestamp.clone()),
    ])
}

pub fn render_leaderboard(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Table
            Constraint::Length(4), // Prompt / instructions
        ])
        .split(f.area());

    let title = Paragraph::new("Leaderboard (Top 10)")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if app.scores.is_empty() {
        f.render_widget(
            Paragraph::new("No scores recorded yet.").alignment(Alignment::Center),
            chunks[1],
        );
    } else {
        let rows: Vec<Row> = app
            .scores
            .iter()
            .enumerate()
            .map(|(i, r)| present_row(i + 1, r))
            .collect();
        let header = Row::new(vec!["#", "Name", "Score", "Mode", "When"])
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Length(17),
            ],
        )
        .header(header)
        .column_spacing(2);
        f.render_widget(table, chunks[1]);
    }

    let mut footer = Vec::new();
    if let Some(msg) = &app.message {
        footer.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    if app.state == AppState::Export {
        footer.push(Line::from(vec![
            Span::styled("Export to file: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(app.input.clone()),
            Span::raw("_"),
        ]));
        footer.push(Line::from(Span::styled(
            "enter to write · esc cancel",
            Style::default().add_modifier(Modifier::DIM),
        )));
    } else {
        footer.push(Line::from(Span::styled(
            "e export · r refresh · esc back",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::GameMode;

    use ratatui::{backend::TestBackend, Terminal};

    fn render_rows(rows: Vec<Row<'static>>, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|f| {
                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(4),
                        Constraint::Min(12),
                        Constraint::Length(7),
                        Constraint::Length(8),
                        Constraint::Length(17),
                    ],
                )
                .column_spacing(2);
                f.render_widget(table, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_present_row_renders_cells() {
        let record = ScoreRecord {
            name: "Ada".into(),
            score: 130,
            mode: GameMode::Timed,
            timestamp: "2026-10-18 12:00".into(),
        };

        let lines = render_rows(vec![present_row(1, &record), present_row(11, &record)], 2);

        assert!(lines[0].starts_with(" 1."));
        assert!(lines[1].starts_with("11."));
        for text in ["Ada", "130", "Timed", "2026-10-18 12:00"] {
            assert!(lines[0].contains(text), "{text} missing from {:?}", lines[0]);
        }
    }
}
