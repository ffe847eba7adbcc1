//! Game plugin - wires the session into a Bevy app
//!
//! Registers the session resources and board messages, and schedules the one
//! system that mutates the session.
//!
//! # Plugin Dependencies
//!
//! Needs only the ECS and the `Update` schedule, so it runs headless under
//! `MinimalPlugins` as well as inside a full windowed app.
//!
//! # Resources
//!
//! - [`GameSession`] - The game on the board (fresh freeform game at startup)
//! - [`NotationClipboard`] - Target of the `Export` command
//!
//! # System Organization
//!
//! ```text
//! GameSystems::Input → GameSystems::Session → GameSystems::Feedback
//!                        handle_board_commands
//! ```
//!
//! # See Also
//!
//! - [`super::events`] - `BoardCommand` / `BoardUpdated`
//! - [`super::system_sets`] - System set definitions

use super::events::{BoardCommand, BoardUpdated};
use super::resources::{GameSession, NotationClipboard};
use super::system_sets::GameSystems;
use super::systems::handle_board_commands;
use bevy::prelude::*;

/// Game plugin for the trainer board
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .init_resource::<NotationClipboard>();

        app.add_message::<BoardCommand>()
            .add_message::<BoardUpdated>();

        app.configure_sets(
            Update,
            (
                GameSystems::Input,
                GameSystems::Session,
                GameSystems::Feedback,
            )
                .chain(),
        );

        app.add_systems(Update, handle_board_commands.in_set(GameSystems::Session));
    }
}
