// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::File;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event;
use tracing::{info, warn};

use metronomiq::audio::{self, ClickEngine};
use metronomiq::clipboard::{ClipboardSink, Osc52Clipboard};
use metronomiq::config::Settings;
use metronomiq::tempo::{TempoMode, TempoModel, MARKINGS};
use metronomiq::timing::{interval_for_bpm, BeatClock};
use metronomiq::ui::{App, KeyAction};

fn print_usage() {
    println!("MetronomiQ - Terminal Metronome");
    println!();
    println!("Usage: metronomiq [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --tempo <BPM>      Start at the given tempo (validated against the mode range)");
    println!("  --precise          Start in precise mode (20-300 BPM)");
    println!("  --config <PATH>    Load settings from a YAML file");
    println!("  --mute             Run without audio output");
    println!("  --markings         Print the tempo marking table");
    println!("  --list-audio       List available audio output devices");
    println!("  --test-click       Play four clicks at 120 BPM and exit");
    println!("  --help             Show this help message");
}

fn print_markings() {
    println!("Traditional tempo markings (BPM ranges):");
    println!();
    for marking in &MARKINGS {
        println!("  {:>3}-{:<3}  {}", marking.low, marking.high, marking.name);
    }
}

fn list_audio() {
    let devices = audio::output::list_devices();
    if devices.is_empty() {
        println!("No audio output devices found");
        return;
    }

    println!("Audio output devices:");
    for (i, name) in devices.iter().enumerate() {
        let marker = if Some(name) == audio::output::default_device_name().as_ref() {
            " (default)"
        } else {
            ""
        };
        println!("  {}: {}{}", i, name, marker);
    }
}

fn test_click() -> Result<()> {
    println!("Playing four clicks at 120 BPM...");

    let mut engine = ClickEngine::new();
    engine.start()?;

    let mut clock = BeatClock::new();
    clock.start(interval_for_bpm(120));

    while clock.ticks() < 4 {
        if clock.tick() {
            engine.play();
            println!("Click {}", clock.ticks());
        }
        thread::sleep(clock.time_until_next_tick().min(Duration::from_millis(10)));
    }

    // Let the last click ring out before the stream closes
    thread::sleep(Duration::from_millis(100));
    println!("Done");
    Ok(())
}

/// Initialize tracing to a log file; the TUI owns the terminal
fn init_logging() {
    let Ok(file) = File::create("metronomiq.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// The metronome event loop: poll the clock, play clicks, handle keys, draw
fn run(settings: Settings, muted: bool) -> Result<()> {
    let mut model = TempoModel::new(settings.tempo, settings.mode);
    let mut clock = BeatClock::new();
    let mut clipboard = Osc52Clipboard::new();

    let mut engine = ClickEngine::new();
    engine.set_volume(settings.volume);
    let mut silent = muted;
    if !muted {
        if let Err(e) = engine.start() {
            // A metronome without sound still shows the beat; keep going
            warn!("audio unavailable, running silent: {}", e);
            silent = true;
        }
    }

    let mut app = App::new(settings.frame_rate)?;
    app.state_mut().update_model(model.display_state());
    if silent {
        app.state_mut().set_status("No audio output - running silent");
    }

    info!(bpm = model.bpm(), mode = %model.mode(), "metronome ready");

    while app.is_running() {
        if clock.tick() {
            engine.play();
            let ticks = clock.ticks();
            app.state_mut().beat(ticks);
        }

        // Wake up for the next click or the next frame, whichever is sooner
        let timeout = if clock.is_running() {
            clock
                .time_until_next_tick()
                .min(app.frame_budget())
                .max(Duration::from_millis(1))
        } else {
            app.frame_budget()
        };

        if let Some(Event::Key(key)) = app.poll_event(timeout)? {
            let action = app.handle_key(key.code, key.modifiers);
            apply_action(action, &mut model, &mut clock, &mut app, &mut clipboard);
        }

        app.state_mut().playing = clock.is_running();
        app.state_mut().clear_expired_status();
        app.draw()?;
    }

    clock.stop();
    engine.stop();
    Ok(())
}

/// Apply a key action to the model and clock, then refresh the UI state
fn apply_action(
    action: KeyAction,
    model: &mut TempoModel,
    clock: &mut BeatClock,
    app: &mut App,
    clipboard: &mut impl ClipboardSink,
) {
    let mut tempo_changed = false;

    match action {
        KeyAction::TogglePlay => {
            if clock.is_running() {
                clock.stop();
            } else {
                clock.start(interval_for_bpm(model.bpm()));
            }
        }
        KeyAction::Escape => {
            if app.state().entry.is_some() {
                app.state_mut().entry = None;
            } else {
                clock.stop();
            }
        }
        KeyAction::SwitchMode => {
            model.switch_mode();
            app.state_mut().entry = None;
            tempo_changed = true;
            let mode = model.mode();
            app.state_mut().set_status(format!("Mode: {}", mode));
        }
        KeyAction::StepUp => {
            model.step_up();
            tempo_changed = true;
        }
        KeyAction::StepDown => {
            model.step_down();
            tempo_changed = true;
        }
        KeyAction::NudgeUp => {
            model.nudge(10);
            tempo_changed = true;
        }
        KeyAction::NudgeDown => {
            model.nudge(-10);
            tempo_changed = true;
        }
        KeyAction::Digit(c) => {
            // Entry is a precise-mode affordance; the dial ignores digits
            if model.mode() == TempoMode::Precise {
                let entry = app.state_mut().entry.get_or_insert_with(String::new);
                if entry.len() < 3 {
                    entry.push(c);
                }
            }
        }
        KeyAction::Backspace => {
            if let Some(entry) = app.state_mut().entry.as_mut() {
                entry.pop();
            }
        }
        KeyAction::CommitEntry => {
            if let Some(entry) = app.state_mut().entry.take() {
                if let Ok(bpm) = entry.parse::<u32>() {
                    // Interactive path: clamp, never fail
                    let stored = model.set_tempo_clamped(bpm);
                    if stored != bpm {
                        app.state_mut()
                            .set_status(format!("Clamped {} to {}", bpm, stored));
                    }
                    tempo_changed = true;
                }
            }
        }
        KeyAction::CopyTempo => {
            let text = model.bpm().to_string();
            copy_with_status(clipboard, app, &text);
        }
        KeyAction::CopyMarking => {
            let text = model.marking().to_string();
            copy_with_status(clipboard, app, &text);
        }
        KeyAction::None | KeyAction::Quit | KeyAction::ToggleHelp => {}
    }

    if tempo_changed {
        if clock.is_running() {
            // New cadence takes effect cleanly, no double click
            clock.restart(interval_for_bpm(model.bpm()));
        }
        let state = model.display_state();
        app.state_mut().update_model(state);
    }
}

fn copy_with_status(clipboard: &mut impl ClipboardSink, app: &mut App, text: &str) {
    match clipboard.copy(text) {
        Ok(()) => app
            .state_mut()
            .set_status(format!("Copied {} to clipboard", text)),
        Err(e) => app.state_mut().set_status(format!("Copy failed: {}", e)),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut settings = Settings::default();
    let mut muted = false;
    let mut tempo_arg: Option<u32> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--markings" => {
                print_markings();
                return Ok(());
            }
            "--list-audio" => {
                list_audio();
                return Ok(());
            }
            "--test-click" => {
                return test_click();
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a file path")
                })?;
                settings = Settings::load(path)?;
                for problem in settings.validate() {
                    eprintln!("Warning: {}", problem);
                }
            }
            "--precise" => {
                settings.mode = TempoMode::Precise;
            }
            "--mute" => {
                muted = true;
            }
            "--tempo" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| {
                    anyhow::anyhow!("--tempo requires a BPM value")
                })?;
                let bpm: u32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid BPM value: {}", value))?;
                tempo_arg = Some(bpm);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    init_logging();

    // The CLI takes the strict path: an out-of-range tempo is an error, not
    // a silent clamp
    if let Some(bpm) = tempo_arg {
        let mut probe = TempoModel::new(settings.tempo, settings.mode);
        probe.set_tempo(bpm)?;
        settings.tempo = bpm;
    }

    run(settings, muted)
}
