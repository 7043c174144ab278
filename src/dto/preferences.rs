use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::preferences::Theme;

/// Theme names exchanged with the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThemeDto {
    /// Dark background.
    Dark,
    /// Light background.
    Light,
}

impl From<Theme> for ThemeDto {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Dark => ThemeDto::Dark,
            Theme::Light => ThemeDto::Light,
        }
    }
}

impl From<ThemeDto> for Theme {
    fn from(value: ThemeDto) -> Self {
        match value {
            ThemeDto::Dark => Theme::Dark,
            ThemeDto::Light => Theme::Light,
        }
    }
}

/// Request replacing the theme preference.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetThemeRequest {
    /// Theme to store.
    pub theme: ThemeDto,
}

/// Current theme preference.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ThemeResponse {
    /// Stored theme.
    pub theme: ThemeDto,
    /// Convenience flag, true for the light theme.
    pub light_mode: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(value: Theme) -> Self {
        Self {
            theme: value.into(),
            light_mode: value == Theme::Light,
        }
    }
}
