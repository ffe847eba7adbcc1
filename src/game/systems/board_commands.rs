//! Board command handling
//!
//! Commands are applied strictly in the order they were written, one session
//! mutation at a time. `ResMut<GameSession>` makes this system the only
//! writer, so no command can observe a half-applied predecessor.

use crate::game::events::{BoardCommand, BoardUpdated};
use crate::game::resources::{ExportSink, GameSession, NotationClipboard, PositionEngine};
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::ResMut;
use tracing::debug;

/// Apply every pending `BoardCommand` to the session
pub fn handle_board_commands(
    mut commands: MessageReader<BoardCommand>,
    mut session: ResMut<GameSession>,
    mut clipboard: ResMut<NotationClipboard>,
    mut updates: MessageWriter<BoardUpdated>,
) {
    for command in commands.read() {
        let accepted = apply_board_command(&mut *session, &mut *clipboard, command);
        debug!(
            "[BOARD] {:?} -> accepted={} status={:?}",
            command,
            accepted,
            session.status_message()
        );
        updates.write(BoardUpdated {
            position: session.position().clone(),
            status: session.status_message().to_string(),
            accepted,
        });
    }
}

/// Apply one command, returning whether it changed anything
///
/// Refusals are already reflected in the session's status message; the
/// error values themselves are not needed by the UI.
pub fn apply_board_command<E: PositionEngine>(
    session: &mut GameSession<E>,
    sink: &mut dyn ExportSink,
    command: &BoardCommand,
) -> bool {
    match command {
        BoardCommand::LoadOpening(opening) => {
            session.load_opening(opening);
            true
        }
        BoardCommand::LoadPuzzle(puzzle) => session.load_puzzle(puzzle).is_ok(),
        BoardCommand::DropPiece {
            from,
            to,
            promotion,
        } => session.apply_move(*from, *to, *promotion).is_ok(),
        BoardCommand::StepForward => matches!(session.step_forward(), Ok(Some(_))),
        BoardCommand::StepBack => session.step_back().is_some(),
        BoardCommand::Undo => session.undo().is_some(),
        BoardCommand::Redo => session.redo().is_some(),
        BoardCommand::Reset => {
            session.reset();
            true
        }
        BoardCommand::Export => session.copy_notation(sink).is_ok(),
        BoardCommand::FlipBoard => {
            session.toggle_orientation();
            true
        }
    }
}
