pub mod gallows;
pub mod scores;
pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, AppState, MENU_ITEMS},
    round::{GameMode, Round, RoundStatus},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Draw whatever the current app state calls for
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn message_line(app: &App) -> Line<'static> {
    match &app.message {
        Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Yellow))),
        None => Line::from(""),
    }
}

fn prompt_line(label: &str, input: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label} "), bold()),
        Span::raw(input.to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ])
}

/// Mask with a space between characters so blanks are countable
pub fn spaced_mask(round: &Round) -> String {
    let mask = round.mask();
    let mut out = String::with_capacity(mask.len() * 2);
    for (i, c) in mask.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub(crate) fn render_menu(app: &App, f: &mut Frame) {
    let mut lines = vec![
        Line::from(Span::styled("H A N G R", bold().fg(Color::Cyan))),
        Line::from(""),
    ];

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let text = format!("{}. {item}", i + 1);
        let style = if i == app.menu_index {
            bold().fg(Color::Green)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(""));
    lines.push(message_line(app));
    lines.push(Line::from(Span::styled("1-4 or ↑↓ enter · q quit", dim())));

    let area = centered(f.area(), 40, lines.len() as u16 + 2);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Menu")),
        area,
    );
}

pub(crate) fn render_prompt(app: &App, f: &mut Frame) {
    let (title, label) = match app.state {
        AppState::ChooseCategory => ("Category", "Choose a category (Pet, Place, Restaurant):"),
        AppState::ChooseDifficulty => (
            "Difficulty",
            "Choose a difficulty (Easy, Medium, Hard, Expert):",
        ),
        AppState::EnterName => ("Save score", "Enter your name for the leaderboard:"),
        _ => ("", ""),
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("{} mode", app.mode), dim())),
        Line::from(""),
        prompt_line(label, &app.input),
        Line::from(""),
        message_line(app),
    ];
    if let (AppState::EnterName, Some(round)) = (app.state, &app.round) {
        lines.insert(
            0,
            Line::from(format!("Score to save: {}", round.score().unwrap_or(0))),
        );
    }

    let width = (label.width() as u16 + 20).max(40);
    let area = centered(f.area(), width, lines.len() as u16 + 2);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

pub(crate) fn render_round(app: &App, f: &mut Frame) {
    let Some(round) = &app.round else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // header + timer
            Constraint::Length(gallows::HEIGHT),
            Constraint::Length(2), // mask
            Constraint::Length(3), // mistakes, used letters
            Constraint::Min(0),
        ])
        .split(f.area());

    let category = app
        .category
        .map(|c| c.to_string())
        .unwrap_or_default();
    let mut header = vec![Line::from(Span::styled(
        format!("{} · {} · {}", round.mode(), category, round.difficulty()),
        dim(),
    ))];
    if let Some(left) = round.seconds_remaining() {
        let color = if left <= 10 { Color::Red } else { Color::Magenta };
        header.push(Line::from(Span::styled(
            format!("Time remaining: {left} seconds"),
            bold().fg(color),
        )));
    }
    f.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

    let stage = gallows::stage_for(round.mistakes(), round.max_mistakes());
    let art: Vec<Line> = gallows::frame(stage).into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(art).alignment(Alignment::Center), chunks[1]);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(spaced_mask(round), bold())))
            .alignment(Alignment::Center),
        chunks[2],
    );

    let used: Vec<String> = round.used_letters().iter().map(|c| c.to_string()).collect();
    let status = vec![
        Line::from(format!(
            "Mistakes: {}/{}",
            round.mistakes(),
            round.max_mistakes()
        )),
        Line::from(Span::styled(format!("Used: {}", used.join(" ")), dim())),
    ];
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[3]);

    let footer = vec![
        message_line(app),
        Line::from(""),
        prompt_line("Guess:", &app.input),
        Line::from(Span::styled("letter or whole word + enter · esc quits round", dim())),
    ];
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[4]);
}

pub(crate) fn render_result(app: &App, f: &mut Frame) {
    let Some(round) = &app.round else {
        return;
    };

    let (headline, color) = match round.status() {
        RoundStatus::Won => ("The word was correctly guessed!", Color::Green),
        RoundStatus::TimedOut => ("Time's up! You didn't guess the word in time.", Color::Red),
        _ => ("The word was not correctly guessed.", Color::Red),
    };

    let mut lines = vec![
        Line::from(Span::styled(headline, bold().fg(color))),
        Line::from(""),
        Line::from(format!("The word was: {}", round.word())),
        Line::from(format!("Score: {}", round.score().unwrap_or(0))),
    ];
    if round.mode() == GameMode::Timed && round.status() == RoundStatus::Won {
        if let Some(left) = round.seconds_remaining() {
            lines.push(Line::from(Span::styled(
                format!("{left} seconds to spare"),
                dim(),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Save to leaderboard? (y/n)",
        bold(),
    )));

    let stage = gallows::stage_for(round.mistakes(), round.max_mistakes());
    let art = gallows::frame(stage);
    let height = lines.len() as u16 + art.len() as u16 + 3;
    let mut all: Vec<Line> = art.into_iter().map(Line::from).collect();
    all.push(Line::from(""));
    all.extend(lines);

    let area = centered(f.area(), 60, height);
    f.render_widget(
        Paragraph::new(all)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Round over")),
        area,
    );
}
