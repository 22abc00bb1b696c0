//! Input Actor: Dedicated thread for polling terminal events.
//!
//! The thread polls crossterm with a timeout so it notices shutdown
//! requests, and forwards key presses and resizes to the host loop.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crossbeam_channel::{SendTimeoutError, Sender};
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request goes unnoticed.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("flapboard-input".to_string())
            .spawn(move || Self::run_loop(&sender, &shutdown_clone, poll_timeout))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.try_send(InputEvent::Shutdown);
                break;
            }

            let event = match event::poll(poll_timeout) {
                Ok(false) => continue,
                Ok(true) => match event::read() {
                    Ok(event) => convert_event(&event),
                    Err(err) => Some(InputEvent::Error(err.to_string())),
                },
                Err(err) => Some(InputEvent::Error(err.to_string())),
            };

            if let Some(event) = event {
                // A receiver that stops reading must not block shutdown.
                match sender.send_timeout(event, poll_timeout) {
                    Ok(()) | Err(SendTimeoutError::Timeout(_)) => {}
                    Err(SendTimeoutError::Disconnected(_)) => break,
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event; events the host ignores map to `None`.
pub(crate) fn convert_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            // Releases and repeats would double every keystroke.
            if key.kind != KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key {
                code: convert_key_code(key.code),
                modifiers: convert_modifiers(key.modifiers),
            })
        }
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

const fn convert_key_code(code: event::KeyCode) -> KeyCode {
    match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => KeyCode::Other,
    }
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key_event(code: event::KeyCode, modifiers: event::KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, modifiers, kind))
    }

    #[test]
    fn test_key_press_converted() {
        let event = key_event(
            event::KeyCode::Char('c'),
            event::KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        let converted = convert_event(&event).unwrap();
        assert!(converted.is_quit());
    }

    #[test]
    fn test_key_release_ignored() {
        let event = key_event(
            event::KeyCode::Char('q'),
            event::KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(convert_event(&event), None);
    }

    #[test]
    fn test_resize_converted() {
        assert_eq!(
            convert_event(&Event::Resize(80, 24)),
            Some(InputEvent::Resize {
                width: 80,
                height: 24
            })
        );
    }

    #[test]
    fn test_unknown_key_is_other() {
        let event = key_event(
            event::KeyCode::F(5),
            event::KeyModifiers::NONE,
            KeyEventKind::Press,
        );
        assert_eq!(
            convert_event(&event),
            Some(InputEvent::Key {
                code: KeyCode::Other,
                modifiers: KeyModifiers::NONE
            })
        );
    }
}
