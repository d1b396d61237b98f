use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::commands::{Command, CommandQueue};
use crate::components::{Board, GameState, Gravity, Shape, Snapshot};

pub fn spawn_shape(world: &mut World) {
    let shape = Shape::random();
    info!("Spawning {:?} shape", shape.kind());

    world.insert_resource(GameState::new(shape));
    render_system(world);
}

pub fn gravity_system(world: &mut World, delta_seconds: f32) {
    trace!("Gravity tick with delta: {delta_seconds}");

    let due = {
        let mut gravity = world.resource_mut::<Gravity>();
        gravity.advance(Duration::try_from_secs_f32(delta_seconds).unwrap_or_default())
    };

    if due > 0 {
        let queue = world.resource::<CommandQueue>();
        for _ in 0..due {
            queue.push(Command::Tick);
        }
    }
}

/// Applies every queued command in order and returns how many were accepted.
pub fn command_system(world: &mut World) -> usize {
    let commands = world.resource::<CommandQueue>().drain();
    if commands.is_empty() {
        return 0;
    }

    let mut accepted = 0;
    for command in commands {
        let next = {
            let board = world.resource::<Board>();
            let state = world.resource::<GameState>();
            state.transition(command, &board.grid)
        };

        if let Some(next) = next {
            debug!(
                "{command:?} accepted, shape now at ({}, {})",
                next.position.x, next.position.y
            );
            *world.resource_mut::<GameState>() = next;
            render_system(world);
            accepted += 1;
        }
    }

    accepted
}

pub fn render_system(world: &mut World) {
    let grid = world.resource::<GameState>().render();
    world.resource_mut::<Snapshot>().replace(grid);
}
