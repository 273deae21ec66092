use parking_lot::Mutex;

/// Interactive highlighting sub-mode. Switching is always a full
/// replacement, so click and hover can never hold simultaneously.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HighlightMode {
    Disabled,
    Click,
    Hover,
}

impl HighlightMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, HighlightMode::Disabled)
    }

    pub fn is_click(&self) -> bool {
        matches!(self, HighlightMode::Click)
    }

    pub fn is_hover(&self) -> bool {
        matches!(self, HighlightMode::Hover)
    }
}

struct GateState {
    mode: HighlightMode,
    properties_edit_active: bool,
}

/// Mode state plus the mutual-exclusion gate against the properties editor.
///
/// `is_interaction_permitted` is recomputed on every call; callers must not
/// cache it across events.
pub struct InteractionGate {
    state: Mutex<GateState>,
}

impl InteractionGate {
    /// Sessions boot with click-mode highlighting active and the properties
    /// editor closed.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                mode: HighlightMode::Click,
                properties_edit_active: false,
            }),
        }
    }

    pub fn set_mode(&self, mode: HighlightMode) {
        self.state.lock().mode = mode;
    }

    pub fn mode(&self) -> HighlightMode {
        self.state.lock().mode
    }

    pub fn set_properties_edit_panel(&self, active: bool) {
        self.state.lock().properties_edit_active = active;
    }

    pub fn properties_edit_panel_active(&self) -> bool {
        self.state.lock().properties_edit_active
    }

    pub fn is_interaction_permitted(&self) -> bool {
        let guard = self.state.lock();
        guard.mode.is_enabled() && !guard.properties_edit_active
    }
}

impl Default for InteractionGate {
    fn default() -> Self {
        Self::new()
    }
}
