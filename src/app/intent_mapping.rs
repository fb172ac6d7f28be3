//! Mapping von Zeiger-Intents auf mutierende ROI-Commands.
//!
//! Hit-Tests beim Press laufen hier gegen den unveränderten State; die
//! Commands tragen das Ergebnis (Messung, Handle, Offset) weiter.

use super::use_cases::pick;
use super::{InputDevice, PointerEvent, RoiCommand, RoiIntent, RoiState, ToolMode};

/// Übersetzt einen `RoiIntent` in eine Sequenz ausführbarer `RoiCommand`s.
pub fn map_intent_to_commands(state: &RoiState, intent: RoiIntent) -> Vec<RoiCommand> {
    match intent {
        RoiIntent::PointerMoved { event } => {
            if state.tool_mode == ToolMode::Disabled
                || state.session.is_some()
                || state.hover_gate.is_suspended()
            {
                return vec![];
            }
            vec![RoiCommand::UpdateHover {
                image_pos: event.current.image,
                display_pos: event.current.display,
                profile: event.device.tolerance_profile(),
            }]
        }
        RoiIntent::PointerPressed { event } => map_press(state, &event),
        RoiIntent::PointerDragged { event } => {
            if state.session.is_none() {
                return vec![];
            }
            vec![RoiCommand::UpdateDrag {
                image_pos: event.current.image,
            }]
        }
        RoiIntent::PointerReleased { .. } | RoiIntent::PointerClicked { .. } => {
            if state.session.is_none() {
                return vec![];
            }
            vec![RoiCommand::EndDrag]
        }
        RoiIntent::ImageRendered => vec![RoiCommand::RefreshStatistics],
        RoiIntent::ToolModeChanged { mode } => vec![RoiCommand::SetToolMode { mode }],
        RoiIntent::ViewChanged { view } => vec![RoiCommand::SetView { view }],
        RoiIntent::OptionsChanged { options } => vec![RoiCommand::ApplyOptions { options }],
    }
}

/// Press: Handle vor Form vor neuer Messung.
fn map_press(state: &RoiState, event: &PointerEvent) -> Vec<RoiCommand> {
    if state.tool_mode == ToolMode::Disabled || state.session.is_some() {
        return vec![];
    }
    let mouse = event.device == InputDevice::Mouse;
    if mouse && !state.options.is_mouse_button_enabled(event.button) {
        log::trace!("Maustaste {} ignoriert", event.button);
        return vec![];
    }

    let profile = event.device.tolerance_profile();

    if let Some((id, key, position)) = pick::pick_handle(state, event.start.image, profile) {
        return vec![RoiCommand::BeginHandleDrag {
            id,
            key,
            grab_offset: position - event.current.image,
            extent: event.extent,
        }];
    }

    if let Some(id) = pick::pick_shape(state, event.start.display, profile) {
        return vec![RoiCommand::BeginShapeDrag {
            id,
            image_pos: event.current.image,
            extent: event.extent,
        }];
    }

    if state.tool_mode == ToolMode::Active {
        return vec![RoiCommand::CreateMeasurement {
            origin: event.current.image,
            extent: event.extent,
        }];
    }
    vec![]
}
