//! Terminal setup and the merged input/tick event stream

use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The next draw picks up the new size
    Resize,
    Tick,
}

/// Key releases and focus/paste events are dropped
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    }
}

fn spawn_input(tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(event) = reader.next().await {
            let Some(event) = event.ok().and_then(translate) else {
                continue;
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}

fn spawn_ticker(tx: UnboundedSender<AppEvent>, tick_rate: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}

/// Terminal events plus a `Tick` every `tick_rate`. Ticks drive the
/// router's deadlines and the typing/waiting animations.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_input(tx.clone());
        spawn_ticker(tx, tick_rate);
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Raw mode, alternate screen and mouse capture, drawing to stderr
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stderr()))?)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Put the terminal back before the default hook prints the panic
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_only_key_presses_pass() {
        let press = key(KeyEventKind::Press);
        assert_eq!(translate(Event::Key(press)), Some(AppEvent::Key(press)));
        assert_eq!(translate(Event::Key(key(KeyEventKind::Release))), None);
        assert_eq!(translate(Event::Key(key(KeyEventKind::Repeat))), None);
    }

    #[test]
    fn test_resize_and_focus() {
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
