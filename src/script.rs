// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Gesture scripts: a line-based text format of host events.
//!
//! ```text
//! # grow the initial curve, then double-tap its segment
//! resize 800 600
//! down 1 400 150
//! move 1 480 150
//! up 1 480 150
//! tap 440 230
//! wait 100
//! tap 440 230
//! ```
//!
//! Pointer commands take a pointer id and a screen position. Their target
//! is found by hit testing unless given explicitly with `on handle <point>
//! <kind>`, `on segment <start> <end>` or `on background`. Time only moves
//! with `wait`, so replays are deterministic.

use crate::editing::{PointerEvent, PointerId, PointerPhase, PointerTarget, WheelEvent};
use crate::editor::Editor;
use crate::model::{HandleKind, PointId};
use kurbo::{Point, Size};
use std::str::SplitWhitespace;
use std::time::{Duration, Instant};

/// Pointer id used by `tap`
const TAP_POINTER: PointerId = 0;

#[derive(Debug, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pointer {
        phase: PointerPhase,
        pointer: PointerId,
        position: Point,
        /// Hit tested when absent
        target: Option<PointerTarget>,
    },
    Wheel {
        position: Point,
        delta_y: f64,
    },
    /// Press and release at one position
    Tap { position: Point },
    Wait(Duration),
    /// At a design position, or under the canvas centre
    AddCurve(Option<Point>),
    Reset,
    DeleteMode,
    Resize(Size),
}

/// A parsed script
#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: Vec<(usize, Command)>,
}

impl Script {
    /// Parse a whole script, failing on the first bad line
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut commands = Vec::new();
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            let parsed = parse_line(text).map_err(|message| ScriptError { line, message })?;
            if let Some(command) = parsed {
                commands.push((line, command));
            }
        }
        Ok(Self { commands })
    }

    /// Parse a script, skipping bad lines and returning their errors
    pub fn parse_lenient(source: &str) -> (Self, Vec<ScriptError>) {
        let mut commands = Vec::new();
        let mut errors = Vec::new();
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            match parse_line(text) {
                Ok(Some(command)) => commands.push((line, command)),
                Ok(None) => {}
                Err(message) => {
                    tracing::warn!("Skipping script line {}: {}", line, message);
                    errors.push(ScriptError { line, message });
                }
            }
        }
        (Self { commands }, errors)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().map(|(_, command)| command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay against `editor` with a virtual clock starting at `start`.
    ///
    /// Returns the clock after the last command.
    pub fn run(&self, editor: &mut Editor, start: Instant) -> Instant {
        let mut now = start;
        for (line, command) in &self.commands {
            tracing::debug!("[script] line {}: {:?}", line, command);
            match *command {
                Command::Pointer {
                    phase,
                    pointer,
                    position,
                    target,
                } => {
                    let target = match (phase, target) {
                        (_, Some(target)) => target,
                        (PointerPhase::Move, None) => PointerTarget::Background,
                        (_, None) => editor.target_at(position),
                    };
                    editor.pointer(PointerEvent::new(pointer, phase, position, target, now));
                }
                Command::Wheel { position, delta_y } => editor.wheel(WheelEvent {
                    position,
                    delta_y,
                    time: now,
                }),
                Command::Tap { position } => {
                    let target = editor.target_at(position);
                    editor.pointer(PointerEvent::down(TAP_POINTER, position, target, now));
                    editor.pointer(PointerEvent::up(TAP_POINTER, position, target, now));
                }
                Command::Wait(duration) => {
                    now += duration;
                    editor.tick(now);
                }
                Command::AddCurve(Some(position)) => {
                    editor.add_curve(position);
                }
                Command::AddCurve(None) => {
                    editor.add_curve_at_center();
                }
                Command::Reset => editor.reset(),
                Command::DeleteMode => {
                    editor.toggle_delete_mode();
                }
                Command::Resize(size) => editor.set_canvas_size(size),
            }
        }
        now
    }
}

/// Parse one line; blank lines and `#` comments yield `None`
pub fn parse_line(text: &str) -> Result<Option<Command>, String> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let mut tokens = Tokens(text.split_whitespace());
    let Some(word) = tokens.0.next() else {
        return Ok(None);
    };

    let command = match word {
        "down" | "move" | "up" | "cancel" | "leave" => {
            let phase = match word {
                "down" => PointerPhase::Down,
                "move" => PointerPhase::Move,
                "up" => PointerPhase::Up,
                "cancel" => PointerPhase::Cancel,
                _ => PointerPhase::Leave,
            };
            let pointer = tokens.int("pointer id")?;
            let position = tokens.point()?;
            let target = tokens.target()?;
            Command::Pointer {
                phase,
                pointer,
                position,
                target,
            }
        }
        "wheel" => {
            let position = tokens.point()?;
            let delta_y = tokens.number("wheel delta")?;
            Command::Wheel { position, delta_y }
        }
        "tap" => Command::Tap {
            position: tokens.point()?,
        },
        "wait" => Command::Wait(Duration::from_millis(tokens.int("milliseconds")?)),
        "add-curve" => {
            if tokens.0.clone().next().is_some() {
                Command::AddCurve(Some(tokens.point()?))
            } else {
                Command::AddCurve(None)
            }
        }
        "reset" => Command::Reset,
        "delete-mode" => Command::DeleteMode,
        "resize" => {
            let width = tokens.number("width")?;
            let height = tokens.number("height")?;
            Command::Resize(Size::new(width, height))
        }
        other => return Err(format!("unknown command `{other}`")),
    };

    tokens.finish()?;
    Ok(Some(command))
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn word(&mut self, what: &str) -> Result<&'a str, String> {
        self.0.next().ok_or_else(|| format!("missing {what}"))
    }

    fn number(&mut self, what: &str) -> Result<f64, String> {
        let word = self.word(what)?;
        word.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid {what} `{word}`"))
    }

    fn int(&mut self, what: &str) -> Result<u64, String> {
        let word = self.word(what)?;
        word.parse::<u64>()
            .map_err(|_| format!("invalid {what} `{word}`"))
    }

    fn point(&mut self) -> Result<Point, String> {
        let x = self.number("x")?;
        let y = self.number("y")?;
        Ok(Point::new(x, y))
    }

    fn target(&mut self) -> Result<Option<PointerTarget>, String> {
        match self.0.next() {
            None => return Ok(None),
            Some("on") => {}
            Some(other) => return Err(format!("expected `on`, found `{other}`")),
        }
        let target = match self.word("target")? {
            "background" => PointerTarget::Background,
            "handle" => {
                let point = PointId::new(self.int("point id")?);
                let name = self.word("handle kind")?;
                let kind = HandleKind::from_name(name)
                    .ok_or_else(|| format!("unknown handle kind `{name}`"))?;
                PointerTarget::Handle { point, kind }
            }
            "segment" => PointerTarget::Segment {
                start: PointId::new(self.int("start point id")?),
                end: PointId::new(self.int("end point id")?),
            },
            other => return Err(format!("unknown target `{other}`")),
        };
        Ok(Some(target))
    }

    fn finish(mut self) -> Result<(), String> {
        match self.0.next() {
            None => Ok(()),
            Some(extra) => Err(format!("unexpected `{extra}`")),
        }
    }
}
