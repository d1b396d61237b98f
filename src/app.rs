#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;
use log::info;

use crate::Time;
use crate::commands::{Command, CommandQueue};
use crate::components::{Board, GameState, Gravity, Snapshot};
use crate::config::{Config, DisplayConfig};
use crate::systems::{command_system, gravity_system, spawn_shape};

pub struct App {
    pub world: World,
    pub should_quit: bool,
    config: Config,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(&Config::current())
    }

    pub fn with_config(config: &Config) -> Self {
        let mut app = Self {
            world: World::new(),
            should_quit: false,
            config: config.clone(),
        };
        app.init_world();
        app
    }

    fn init_world(&mut self) {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Board::default());
        world.insert_resource(Snapshot::default());
        world.insert_resource(CommandQueue::new());
        world.insert_resource(Gravity::new(self.config.gravity.interval()));

        // Spawn initial shape
        spawn_shape(&mut world);

        self.world = world;
    }

    /// Queues a command for the next update.
    pub fn push(&self, command: Command) {
        self.world.resource::<CommandQueue>().push(command);
    }

    #[must_use]
    pub fn command_sender(&self) -> Sender<Command> {
        self.world.resource::<CommandQueue>().sender()
    }

    /// Updates the `Time` resource and returns the seconds since the previous call.
    pub fn advance_clock(&mut self) -> f32 {
        let mut time = self.world.resource_mut::<Time>();
        time.update();
        time.delta_seconds()
    }

    /// Runs gravity and then every pending command. Returns the accepted command count.
    pub fn update(&mut self, delta_seconds: f32) -> usize {
        gravity_system(&mut self.world, delta_seconds);
        command_system(&mut self.world)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        self.world.resource::<Snapshot>()
    }

    #[must_use]
    pub fn display(&self) -> &DisplayConfig {
        &self.config.display
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // Pick up new settings without restarting the current fall
    pub fn apply_config(&mut self, config: &Config) {
        self.config = config.clone();
        self.world
            .resource_mut::<Gravity>()
            .set_interval(config.gravity.interval());
    }

    /// Reset the game state
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.should_quit = false;
        self.init_world();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
