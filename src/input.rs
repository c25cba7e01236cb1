//! Terminal input, reduced to the two events the game understands.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::config::{OK_BUTTON, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geom::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    /// Primary button press at a world position.
    Press(Point),
}

impl InputEvent {
    /// A press that flaps without landing on any button.
    pub const FLAP: InputEvent = InputEvent::Press(Point::new(0.0, 0.0));

    /// A press in the middle of the game-over "OK" button.
    pub fn ok_button() -> Self {
        let (left, right, top, bottom) = OK_BUTTON;
        InputEvent::Press(Point::new(
            (left + right) as f64 / 2.0,
            (top + bottom) as f64 / 2.0,
        ))
    }
}

/// Everything that arrived since the previous tick.
#[derive(Debug, Default)]
pub struct Polled {
    pub events: Vec<InputEvent>,
    /// Latest terminal size, if it changed.
    pub resized: Option<(u16, u16)>,
}

/// Drain every pending terminal event without blocking.
pub fn drain(cols: u16, rows: u16) -> io::Result<Polled> {
    let mut polled = Polled::default();
    let (mut cols, mut rows) = (cols, rows);
    while event::poll(Duration::ZERO)? {
        let ev = event::read()?;
        if let Event::Resize(c, r) = ev {
            (cols, rows) = (c, r);
            polled.resized = Some((c, r));
            continue;
        }
        if let Some(input) = translate(&ev, cols, rows) {
            polled.events.push(input);
        }
    }
    Ok(polled)
}

pub fn translate(ev: &Event, cols: u16, rows: u16) -> Option<InputEvent> {
    match ev {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Press(cell_to_world(
                mouse.column,
                mouse.row,
                cols,
                rows,
            ))),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Up => Some(InputEvent::FLAP),
        KeyCode::Enter => Some(InputEvent::ok_button()),
        _ => None,
    }
}

/// Centre of a terminal cell, in world coordinates.
pub fn cell_to_world(col: u16, row: u16, cols: u16, rows: u16) -> Point {
    let cols = cols.max(1) as f64;
    let rows = rows.max(1) as f64;
    Point::new(
        (col as f64 + 0.5) * SCREEN_WIDTH as f64 / cols,
        (row as f64 + 0.5) * SCREEN_HEIGHT as f64 / rows,
    )
}
