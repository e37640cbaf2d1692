use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tracing::debug;

use crate::model::theme::Theme;
use crate::repository::{KeyValueStore, Persistence};

/// Presentation-side effect of a theme change.
pub trait ThemeApplier {
    fn apply(&self, theme: Theme);
}

/// Shared "dark mode" switch read by the renderer. Clones observe the same
/// value.
#[derive(Clone, Default, Debug)]
pub struct DarkModeFlag(Rc<Cell<bool>>);

impl DarkModeFlag {
    pub fn is_dark(&self) -> bool {
        self.0.get()
    }
}

impl ThemeApplier for DarkModeFlag {
    fn apply(&self, theme: Theme) {
        self.0.set(theme.is_dark());
    }
}

pub struct ThemeService<S: KeyValueStore, A: ThemeApplier = DarkModeFlag> {
    persistence: Persistence<S>,
    theme: Theme,
    applier: A,
}

impl<S: KeyValueStore, A: ThemeApplier> ThemeService<S, A> {
    /// Loads the stored (or ambient) theme and applies it right away.
    pub fn load(persistence: Persistence<S>, applier: A) -> Self {
        let theme = persistence.load_theme();
        applier.apply(theme);
        debug!(theme = theme.as_str(), "theme loaded");
        Self {
            persistence,
            theme,
            applier,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn applier(&self) -> &A {
        &self.applier
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.applier.apply(theme);
        self.persistence.save_theme(theme)
    }
}
