// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the metronome.
//!
//! Provides a ratatui-based interface with the tempo readout, the traditional
//! marking, the Maelzel dial or precise entry field, and a status bar.

mod controls;

pub use controls::{render_dial, render_entry, render_transport};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::tempo::{nearest_stop, DisplayState, TempoMode};

/// How long the beat indicator stays lit after a click
const BEAT_FLASH: Duration = Duration::from_millis(120);

/// UI state, refreshed from the tempo model and beat clock each frame
#[derive(Debug, Clone)]
pub struct UiState {
    /// Current tempo in BPM
    pub bpm: u32,
    /// Traditional marking for the current tempo
    pub marking: &'static str,
    /// Active mode
    pub mode: TempoMode,
    /// Whether the clock is running
    pub playing: bool,
    /// Dial stop index for the Maelzel dial
    pub stop_index: usize,
    /// Active precise-entry buffer
    pub entry: Option<String>,
    /// Clicks since the last start
    pub tick_count: u64,
    /// When the last click fired (drives the beat flash)
    pub last_beat: Option<Instant>,
    /// Help overlay visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            bpm: 120,
            marking: "Moderato",
            mode: TempoMode::Maelzel,
            playing: false,
            stop_index: nearest_stop(120),
            entry: None,
            tick_count: 0,
            last_beat: None,
            show_help: false,
            status_message: None,
            status_time: None,
        }
    }
}

impl UiState {
    /// Refresh the tempo readout from the model
    pub fn update_model(&mut self, state: DisplayState) {
        self.bpm = state.bpm;
        self.marking = state.marking;
        self.mode = state.mode;
        self.stop_index = nearest_stop(state.bpm);
    }

    /// Record a click for the beat flash and counter
    pub fn beat(&mut self, tick_count: u64) {
        self.tick_count = tick_count;
        self.last_beat = Some(Instant::now());
    }

    /// Whether the beat indicator should be lit
    pub fn beat_flash(&self) -> bool {
        self.last_beat
            .map(|t| t.elapsed() < BEAT_FLASH)
            .unwrap_or(false)
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// Key event result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Start or stop the clock
    TogglePlay,
    /// Escape: cancel entry if one is active, otherwise stop
    Escape,
    /// Switch between Maelzel and precise mode
    SwitchMode,
    /// Next dial stop (Maelzel) or +1 BPM (precise)
    StepUp,
    /// Previous dial stop (Maelzel) or -1 BPM (precise)
    StepDown,
    /// +10 BPM
    NudgeUp,
    /// -10 BPM
    NudgeDown,
    /// Copy the BPM value to the clipboard
    CopyTempo,
    /// Copy the marking name to the clipboard
    CopyMarking,
    /// A digit for the precise entry buffer
    Digit(char),
    /// Remove the last entry digit
    Backspace,
    /// Commit the entry buffer as the new tempo
    CommitEntry,
    /// Toggle help
    ToggleHelp,
}

/// Terminal UI application
pub struct App {
    /// UI state (single event loop, no sharing needed)
    state: UiState,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Create a new app, taking over the terminal
    pub fn new(frame_rate: u32) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state: UiState::default(),
            terminal,
            frame_rate: frame_rate.clamp(1, 120),
            running: true,
        })
    }

    /// UI state
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Mutable UI state
    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Time budget for one frame
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(1000 / self.frame_rate as u64)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        match (code, modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.quit();
                KeyAction::Quit
            }

            // Transport
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::TogglePlay,
            (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Escape,

            // Mode
            (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::SwitchMode,

            // Tempo
            (KeyCode::Up, KeyModifiers::NONE) | (KeyCode::Right, KeyModifiers::NONE) => {
                KeyAction::StepUp
            }
            (KeyCode::Down, KeyModifiers::NONE) | (KeyCode::Left, KeyModifiers::NONE) => {
                KeyAction::StepDown
            }
            (KeyCode::Up, KeyModifiers::SHIFT) => KeyAction::NudgeUp,
            (KeyCode::Down, KeyModifiers::SHIFT) => KeyAction::NudgeDown,

            // Clipboard
            (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::CopyTempo,
            (KeyCode::Char('C'), KeyModifiers::SHIFT) => KeyAction::CopyMarking,

            // Precise entry
            (KeyCode::Char(c @ '0'..='9'), KeyModifiers::NONE) => KeyAction::Digit(c),
            (KeyCode::Backspace, KeyModifiers::NONE) => KeyAction::Backspace,
            (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::CommitEntry,

            // Help
            (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                self.state.show_help = !self.state.show_help;
                KeyAction::ToggleHelp
            }

            _ => KeyAction::None,
        }
    }

    /// Poll for events with a timeout
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        let state = self.state.clone();

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(9), // Tempo readout
                    Constraint::Min(5),    // Controls
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            render_indication(frame, chunks[0], &state);
            render_controls(frame, chunks[1], &state);
            render_status_bar(frame, chunks[2], &state);

            if state.show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the tempo readout: big BPM, marking, mode
fn render_indication(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title(" MetronomiQ ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "Current tempo:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("{}", state.bpm),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "beats per minute",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Traditional tempo marking:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            state.marking,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Mode: {}", state.mode),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).centered();
    frame.render_widget(widget, inner);
}

/// Render the controls panel: transport line plus the mode's selector
fn render_controls(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title(" Controls ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Transport
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Dial / entry
            Constraint::Min(0),
        ])
        .split(inner);

    render_transport(frame, chunks[0], state.playing, state.beat_flash());

    match state.mode {
        TempoMode::Maelzel => render_dial(frame, chunks[2], state.stop_index),
        TempoMode::Precise => render_entry(frame, chunks[2], state.entry.as_deref()),
    }
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg.clone(), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " Space: Start/Stop | m: Switch mode | Up/Down: Tempo | c/C: Copy | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 48.min(area.width.saturating_sub(4));
    let height = 15.min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        help_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled("Transport", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Space       Start/Stop"),
        Line::from("  Esc         Stop (or cancel entry)"),
        Line::from(""),
        Line::from(Span::styled("Tempo", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down     Next/previous tempo"),
        Line::from("  Shift+Up/Dn Tempo +/- 10 BPM"),
        Line::from("  m           Switch Maelzel/precise mode"),
        Line::from("  0-9, Enter  Type exact BPM (precise mode)"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  c / C       Copy BPM / marking"),
        Line::from("  h/?         Toggle help"),
        Line::from("  q/Ctrl+c    Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
