use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::events::AppEvent;
use crate::events::Event;
use crate::events::SimEvent;

/// Horizontal braille dots per terminal character
const DOTS_X: i64 = 2;

/// Vertical braille dots per terminal character
const DOTS_Y: i64 = 4;

/// Converts a crossterm event into a lifegrid event.
///
/// `origin` is the terminal cell `(col, row)` where the top left of the surface is drawn. Clicks
/// are translated into surface pixels relative to it.
pub fn convert_event(event: CrossTermEvent, origin: (u16, u16)) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            // pressed left of or above the surface
            let col = column.checked_sub(origin.0)?;
            let row = row.checked_sub(origin.1)?;

            Some(Event::Sim(SimEvent::Click {
                px: col as i64 * DOTS_X,
                py: row as i64 * DOTS_Y,
            }))
        }
        CrossTermEvent::Resize(cols, rows) => Some(Event::App(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let event = match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } => Event::App(AppEvent::Exit),
        KeyEvent {
            code: KeyCode::Char('p'),
            ..
        } => Event::Sim(SimEvent::TogglePause),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Event::Sim(SimEvent::Randomize),
        KeyEvent {
            code: KeyCode::Char('+'),
            ..
        } => Event::Sim(SimEvent::SpeedUp),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Event::Sim(SimEvent::SlowDown),
        _ => return None,
    };

    Some(event)
}
