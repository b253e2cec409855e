//! Popup view model
//!
//! Pure state: what the toggle, the intensity buttons and the status line
//! should show. Rendering it into the DOM is the extension's job.

use lull_core::{Intensity, Settings};

/// Status text shown briefly after a save
pub const SAVED_TEXT: &str = "Saved settings";

/// Status text while the normalizer is off
pub const DISABLED_TEXT: &str = "Normalizer disabled";

/// Ticket identifying one save confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket(u64);

/// Status line under the controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Text of `#statusText`
    pub text: &'static str,

    /// `active` class on the status container
    pub active: bool,

    /// `success` class on the status container
    pub success: bool,
}

/// One `.intensity-btn`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityButton {
    pub intensity: Intensity,

    /// `active` class: this is the selected preset
    pub selected: bool,

    /// Buttons are disabled while the normalizer is off
    pub disabled: bool,
}

/// Everything the popup renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    /// `#enableToggle` checked state
    pub toggle_checked: bool,
    pub buttons: [IntensityButton; 3],
    pub status: StatusLine,
}

impl PopupView {
    /// Button for a given preset
    pub fn button(&self, intensity: Intensity) -> IntensityButton {
        self.buttons[Intensity::ALL
            .iter()
            .position(|i| *i == intensity)
            .unwrap_or_default()]
    }
}

/// Local popup state
#[derive(Debug, Clone, Default)]
pub struct PopupModel {
    settings: Settings,
    saved: Option<SaveTicket>,
    issued: u64,
}

impl PopupModel {
    /// Current local settings
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Replace local settings with the hub's
    pub fn load(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Flip the enabled flag; returns the settings to persist
    pub fn set_enabled(&mut self, enabled: bool) -> Settings {
        self.settings = self.settings.with_enabled(enabled);
        self.settings
    }

    /// Pick a preset; returns the settings to persist
    pub fn set_intensity(&mut self, intensity: Intensity) -> Settings {
        self.settings = self.settings.with_intensity(intensity);
        self.settings
    }

    /// Start showing the save confirmation
    ///
    /// Supersedes any confirmation already showing.
    pub fn mark_saved(&mut self) -> SaveTicket {
        self.issued += 1;
        let ticket = SaveTicket(self.issued);
        self.saved = Some(ticket);
        ticket
    }

    /// End the confirmation started with `ticket`
    ///
    /// Returns `false` (and changes nothing) if a newer save took over.
    pub fn expire(&mut self, ticket: SaveTicket) -> bool {
        if self.saved == Some(ticket) {
            self.saved = None;
            true
        } else {
            false
        }
    }

    /// Whether the save confirmation is showing
    pub fn is_showing_saved(&self) -> bool {
        self.saved.is_some()
    }

    /// Steady-state status describing the current mode
    pub fn mode_status(&self) -> StatusLine {
        if self.settings.enabled {
            StatusLine {
                text: self.settings.intensity.label(),
                active: true,
                success: false,
            }
        } else {
            StatusLine {
                text: DISABLED_TEXT,
                active: false,
                success: false,
            }
        }
    }

    /// Full view
    pub fn view(&self) -> PopupView {
        let status = if self.is_showing_saved() {
            StatusLine {
                text: SAVED_TEXT,
                success: true,
                ..self.mode_status()
            }
        } else {
            self.mode_status()
        };

        PopupView {
            toggle_checked: self.settings.enabled,
            buttons: Intensity::ALL.map(|intensity| IntensityButton {
                intensity,
                selected: intensity == self.settings.intensity,
                disabled: !self.settings.enabled,
            }),
            status,
        }
    }
}
