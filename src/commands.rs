#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::event::KeyCode;
use log::trace;

// Requests consumed serially by the movement controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    Tick,
}

impl Command {
    /// Maps a browser-style key identifier such as `"ArrowLeft"`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Command::MoveLeft),
            "ArrowRight" => Some(Command::MoveRight),
            "ArrowDown" => Some(Command::MoveDown),
            "ArrowUp" => Some(Command::Rotate),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Command::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveRight),
            KeyCode::Down | KeyCode::Char('s') => Some(Command::MoveDown),
            KeyCode::Up | KeyCode::Char('w') => Some(Command::Rotate),
            _ => None,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CommandQueue {
    sender: Sender<Command>,
    receiver: Receiver<Command>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn push(&self, command: Command) {
        trace!("Queued {command:?}");
        // The receiver lives in the same struct, so the channel cannot be disconnected
        let _ = self.sender.send(command);
    }

    /// A producer handle that can outlive borrows of the world.
    #[must_use]
    pub fn sender(&self) -> Sender<Command> {
        self.sender.clone()
    }

    /// Takes every pending command in arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<Command> {
        self.receiver.try_iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
