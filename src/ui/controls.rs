// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo control widgets: the Maelzel dial and the precise entry field.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tempo::MAELZEL_STOPS;

/// Render the Maelzel dial: min label, one notch per dial stop with the
/// current stop highlighted, max label
pub fn render_dial(frame: &mut Frame, area: Rect, stop_index: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),  // Min label
            Constraint::Min(10),    // Notches
            Constraint::Length(4),  // Max label
        ])
        .split(area);

    let min_label = Paragraph::new(format!("{}", MAELZEL_STOPS[0]))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(min_label, chunks[0]);

    // One notch per stop; ratatui truncates if the terminal is too narrow
    let mut spans = Vec::with_capacity(MAELZEL_STOPS.len());
    for i in 0..MAELZEL_STOPS.len() {
        if i == stop_index {
            spans.push(Span::styled(
                "●",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled("┼", Style::default().fg(Color::DarkGray)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    let max_label = Paragraph::new(format!("{}", MAELZEL_STOPS[MAELZEL_STOPS.len() - 1]))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(max_label, chunks[2]);
}

/// Render the precise-mode entry line.
///
/// With an active buffer the typed digits show with a cursor; otherwise the
/// prompt invites typing.
pub fn render_entry(frame: &mut Frame, area: Rect, entry: Option<&str>) {
    let line = match entry {
        Some(buffer) => Line::from(vec![
            Span::styled("Input integer BPM (20-300): ", Style::default().fg(Color::Gray)),
            Span::styled(
                buffer.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().fg(Color::Magenta)),
            Span::styled("  Enter to set, Esc to cancel", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            "Type digits to enter a BPM (20-300)",
            Style::default().fg(Color::Gray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the running/stopped indicator with a beat flash
pub fn render_transport(frame: &mut Frame, area: Rect, playing: bool, flash: bool) {
    let line = if playing {
        let beat = if flash {
            Span::styled("  ♩", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("   ")
        };
        Line::from(vec![
            Span::styled(
                "▶ RUNNING",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            beat,
        ])
    } else {
        Line::from(Span::styled("■ STOPPED", Style::default().fg(Color::Yellow)))
    };

    frame.render_widget(Paragraph::new(line), area);
}
