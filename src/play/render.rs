use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::keyboard::{Key, KeyboardLayout};
use crate::wordle::{
    core::Verdict,
    session::{Cell, State},
    Session,
};

const TITLE: &str = "W O R D L E";
const HELP: &str = "type to guess · enter submit · ctrl-n new game · ? rules · esc quit";
const GAME_OVER_HELP: &str = "ctrl-n new game · esc quit";

fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Correct => Style::new()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Verdict::Present => Style::new()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Verdict::Absent => Style::new().fg(Color::White).bg(Color::DarkGray),
    }
}

/// `cursor` marks the empty cell the next letter goes into.
fn tile(cell: Cell, cursor: bool) -> Span<'static> {
    match cell {
        Cell::Empty if cursor => Span::styled(
            " _ ",
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => Span::styled(" · ", Style::new().fg(Color::DarkGray)),
        Cell::Letter(letter) => Span::styled(
            format!(" {} ", letter.to_ascii_uppercase()),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Cell::Scored(letter, verdict) => Span::styled(
            format!(" {} ", letter.to_ascii_uppercase()),
            verdict_style(verdict),
        ),
    }
}

fn grid(session: &Session) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let cursor = (!session.is_over() && !session.is_row_submitted(session.row()))
        .then(|| (session.row(), session.col()));

    for (i, row) in session.grid().rows().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let mut spans = Vec::with_capacity(row.len() * 2);
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(tile(*cell, cursor == Some((i, j))));
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn grid_height(session: &Session) -> u16 {
    let rows = session.dimensions().attempts;
    u16::try_from(rows * 2 - 1).unwrap_or(u16::MAX)
}

fn draw_keyboard(frame: &mut Frame, session: &Session, area: Rect) -> KeyboardLayout {
    let layout = KeyboardLayout::new(area);

    for (key, rect) in layout.keys() {
        let hint = match key {
            Key::Letter(letter) => session.hints().get(*letter),
            _ => None,
        };
        let style = hint.map_or_else(
            || Style::new().fg(Color::Black).bg(Color::Gray),
            verdict_style,
        );

        // label on the middle line of the key
        let label = vec![Line::default(), Line::from(key.label())];
        frame.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center),
            *rect,
        );
    }

    layout
}

/// Draws the whole game and returns the keyboard as it was laid out.
///
/// `error` replaces the session's own message when the last command failed.
/// `show_rules` draws the rules over everything else.
pub fn draw(
    frame: &mut Frame,
    session: &Session,
    error: Option<&str>,
    show_rules: bool,
) -> KeyboardLayout {
    let [title, grid_area, message, keyboard, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(grid_height(session)),
        Constraint::Length(3),
        Constraint::Length(KeyboardLayout::HEIGHT),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(TITLE)
            .style(Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        title,
    );

    frame.render_widget(
        Paragraph::new(grid(session)).alignment(Alignment::Center),
        grid_area,
    );

    let message_line = match error {
        Some(error) => Line::styled(error.to_owned(), Style::new().fg(Color::Red)),
        None => Line::raw(session.message().to_owned()),
    };
    frame.render_widget(
        Paragraph::new(vec![Line::default(), message_line]).alignment(Alignment::Center),
        message,
    );

    let layout = draw_keyboard(frame, session, keyboard);

    frame.render_widget(
        Paragraph::new(vec![
            Line::default(),
            Line::raw(match session.state() {
                State::Playing => HELP,
                State::Won | State::Lost => GAME_OVER_HELP,
            }),
        ])
        .style(Style::new().fg(Color::DarkGray))
        .alignment(Alignment::Center),
        help,
    );

    if show_rules {
        draw_rules(frame, session);
    }

    layout
}

fn rules(session: &Session) -> Vec<Line<'static>> {
    let dimensions = session.dimensions();
    let example = |letter: char, verdict: Verdict, text: &'static str| {
        Line::from(vec![
            tile(Cell::Scored(letter, verdict), false),
            Span::raw("  "),
            Span::raw(text),
        ])
    };

    vec![
        Line::styled(
            format!("Guess the word in {} tries.", dimensions.attempts),
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::raw(format!(
            "Each guess must be a valid {}-letter word.",
            dimensions.word_length
        )),
        Line::raw("The colour of the tiles shows how close your guess was."),
        Line::default(),
        example('w', Verdict::Correct, "W is in the word and in the right spot."),
        example('i', Verdict::Present, "I is in the word but in the wrong spot."),
        example('u', Verdict::Absent, "U is not in the word in any spot."),
        Line::default(),
        Line::styled("? or esc to close", Style::new().fg(Color::DarkGray)),
    ]
}

fn draw_rules(frame: &mut Frame, session: &Session) {
    let lines = rules(session);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);

    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(62)])
        .flex(Flex::Center)
        .areas(area);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" how to play ")),
        area,
    );
}
