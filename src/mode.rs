//! Emergency mode toggle
//!
//! A two-state preference persisted as `"true"`/`"false"` and rendered onto a
//! [`ModeSurface`].

use crate::config::PageConfig;
use crate::error::Result;
use crate::platform::{KeyValueStore, ModeSurface};

/// Emergency mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmergencyMode {
    #[default]
    Off,
    On,
}

impl EmergencyMode {
    pub fn is_on(self) -> bool {
        self == EmergencyMode::On
    }

    pub fn toggled(self) -> Self {
        match self {
            EmergencyMode::Off => EmergencyMode::On,
            EmergencyMode::On => EmergencyMode::Off,
        }
    }

    /// Stored representation
    pub fn as_str(self) -> &'static str {
        match self {
            EmergencyMode::Off => "false",
            EmergencyMode::On => "true",
        }
    }

    /// Anything but `"true"` reads as off
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("true") => EmergencyMode::On,
            _ => EmergencyMode::Off,
        }
    }

    /// Button label for this state
    pub fn label(self, config: &PageConfig) -> &str {
        match self {
            EmergencyMode::Off => &config.label_off,
            EmergencyMode::On => &config.label_on,
        }
    }

    /// Load the stored preference, defaulting to off
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        Self::from_stored(store.get(key).as_deref())
    }

    pub fn save(self, store: &impl KeyValueStore, key: &str) -> Result<()> {
        store.set(key, self.as_str())
    }
}

/// Toggle controller tying the preference to its store and surface
pub struct ModeToggle<S, P> {
    mode: EmergencyMode,
    store: S,
    surface: P,
    config: PageConfig,
}

impl<S: KeyValueStore, P: ModeSurface> ModeToggle<S, P> {
    /// Restore the stored state and render it
    pub fn init(store: S, surface: P, config: PageConfig) -> Self {
        let mode = EmergencyMode::load(&store, &config.storage_key);
        let toggle = Self {
            mode,
            store,
            surface,
            config,
        };
        toggle.render();
        log::info!("Emergency mode restored: {}", toggle.mode.as_str());
        toggle
    }

    pub fn mode(&self) -> EmergencyMode {
        self.mode
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip the state, persist it and re-render.
    ///
    /// The page is updated even when persisting fails; the error is returned
    /// so the caller can log it.
    pub fn toggle(&mut self) -> Result<EmergencyMode> {
        self.mode = self.mode.toggled();
        self.render();
        if self.mode.is_on() && self.config.vibrate_ms > 0 {
            self.surface.vibrate(self.config.vibrate_ms);
        }
        self.mode.save(&self.store, &self.config.storage_key)?;
        Ok(self.mode)
    }

    fn render(&self) {
        self.surface.set_mode_class(self.mode.is_on());
        self.surface
            .set_toggle_button(self.mode.label(&self.config), self.mode.is_on());
    }
}
