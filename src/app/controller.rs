//! ROI-Controller für zentrale Event-Verarbeitung.

use super::{RoiCommand, RoiIntent, RoiState};

/// Orchestriert Zeiger-Events und Use-Cases auf den RoiState.
#[derive(Default)]
pub struct RoiController;

impl RoiController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut RoiState, intent: RoiIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &RoiState, intent: RoiIntent) -> Vec<RoiCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem RoiState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut RoiState,
        command: RoiCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Hover & Sessions ===
            RoiCommand::UpdateHover {
                image_pos,
                display_pos,
                profile,
            } => handlers::drag::hover(state, image_pos, display_pos, profile),
            RoiCommand::CreateMeasurement { origin, extent } => {
                handlers::drag::create(state, origin, extent)
            }
            RoiCommand::BeginHandleDrag {
                id,
                key,
                grab_offset,
                extent,
            } => handlers::drag::begin_handle(state, id, key, grab_offset, extent),
            RoiCommand::BeginShapeDrag {
                id,
                image_pos,
                extent,
            } => handlers::drag::begin_shape(state, id, image_pos, extent),
            RoiCommand::UpdateDrag { image_pos } => handlers::drag::update(state, image_pos),
            RoiCommand::EndDrag => handlers::drag::end(state),

            // === Rendern, View & Optionen ===
            RoiCommand::RefreshStatistics => handlers::view::refresh_statistics(state),
            RoiCommand::SetToolMode { mode } => handlers::view::set_tool_mode(state, mode),
            RoiCommand::SetView { view } => handlers::view::set_view(state, view),
            RoiCommand::ApplyOptions { options } => handlers::view::apply_options(state, options),
        }

        Ok(())
    }
}
