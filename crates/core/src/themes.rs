//! Themes

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visual theme of the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Gradient cards, the default look.
    #[default]
    Modern,
    /// Flat monochrome layout.
    Minimalist,
    /// Frosted translucent panels.
    Glass,
    /// Soft neumorphic shadows.
    Neu,
    /// Hard borders and raw type.
    Brutalist,
    /// Material Design surfaces.
    Material,
}

/// A theme name that matches no [`Theme`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Every theme, in picker order.
    pub const ALL: [Self; 6] = [
        Self::Modern,
        Self::Minimalist,
        Self::Glass,
        Self::Neu,
        Self::Brutalist,
        Self::Material,
    ];

    /// Stored and serialised name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Minimalist => "minimalist",
            Self::Glass => "glass",
            Self::Neu => "neu",
            Self::Brutalist => "brutalist",
            Self::Material => "material",
        }
    }

    /// Class applied to the document body, e.g. `theme-glass`.
    #[must_use]
    pub fn css_class(self) -> String {
        format!("theme-{}", self.as_str())
    }

    /// Read a stored theme name, falling back to the default for unknown
    /// names.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == value)
            .ok_or_else(|| UnknownTheme(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stored_theme_falls_back_to_modern() {
        assert_eq!(Theme::from_stored("vaporwave"), Theme::Modern);
        assert_eq!(Theme::from_stored(" glass "), Theme::Glass);
    }

    #[test]
    fn css_class_is_prefixed() {
        assert_eq!(Theme::Brutalist.css_class(), "theme-brutalist");
    }
}
