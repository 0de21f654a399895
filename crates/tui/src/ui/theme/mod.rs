//! Theme styling for the bound input.
//!
//! Defines the Nord palette (default and high-contrast), semantic theme roles
//! and helper builders for Ratatui widgets. Prefer these helpers over
//! hard-coding colors.

use std::env;

use tracing::debug;

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::{Theme, ThemeRoles};
pub use theme_helpers::LabelStyle;

/// Selects a theme from the `TUI_THEME` environment variable.
///
/// `nord-high-contrast` (or `high-contrast`) picks the brightened variant;
/// anything else uses the default Nord palette.
pub fn load_from_env() -> Box<dyn Theme> {
    let requested = env::var("TUI_THEME").unwrap_or_default();
    resolve(requested.trim())
}

fn resolve(name: &str) -> Box<dyn Theme> {
    match name.to_ascii_lowercase().as_str() {
        "nord-high-contrast" | "high-contrast" => Box::new(NordThemeHighContrast::new()),
        "" | "nord" => Box::new(NordTheme::new()),
        other => {
            debug!(theme = other, "unknown theme requested; using nord");
            Box::new(NordTheme::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_picks_high_contrast_by_name() {
        let theme = resolve("High-Contrast");
        assert_eq!(theme.roles().focus, nord::F3);
        let theme = resolve("unknown");
        assert_eq!(theme.roles().focus, nord::F1);
    }
}
