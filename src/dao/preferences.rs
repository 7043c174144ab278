use std::sync::Arc;

use tracing::warn;

use crate::dao::{preference_store::PreferenceStore, storage::StorageResult};

/// Key holding the wheel names as a JSON array of strings.
pub const WHEEL_NAMES_KEY: &str = "wheelNames";
/// Key holding the light-mode flag as `"true"` / `"false"`.
pub const LIGHT_MODE_KEY: &str = "luckCenter_lightMode";

/// Theme applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Default theme.
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Decode the stored flag; anything but `"true"` is dark mode.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("true") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// Flag written back to the store.
    pub fn as_stored(&self) -> &'static str {
        match self {
            Theme::Light => "true",
            Theme::Dark => "false",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Typed access to the persisted preferences.
pub struct PreferencesRepository {
    store: Arc<dyn PreferenceStore>,
}

impl PreferencesRepository {
    /// Repository over `store`.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Load the wheel names; a missing or unreadable entry yields an empty list.
    pub async fn load_wheel_names(&self) -> StorageResult<Vec<String>> {
        let Some(raw) = self.store.get(WHEEL_NAMES_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => Ok(names),
            Err(err) => {
                warn!(error = %err, "stored wheel names are not a string array; starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Persist the wheel names as a JSON array.
    pub async fn save_wheel_names(&self, names: &[String]) -> StorageResult<()> {
        // Serialising a slice of strings cannot fail.
        let encoded = serde_json::to_string(names).unwrap_or_else(|_| "[]".into());
        self.store.set(WHEEL_NAMES_KEY, encoded).await
    }

    /// Load the theme, defaulting to dark mode.
    pub async fn load_theme(&self) -> StorageResult<Theme> {
        let stored = self.store.get(LIGHT_MODE_KEY).await?;
        Ok(Theme::from_stored(stored.as_deref()))
    }

    /// Persist the theme flag.
    pub async fn save_theme(&self, theme: Theme) -> StorageResult<()> {
        self.store
            .set(LIGHT_MODE_KEY, theme.as_stored().to_string())
            .await
    }
}
