//! User preferences and the key-value store they persist to.

use std::collections::HashMap;

pub const THEME_KEY: &str = "theme";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const PINNED_PLAYER_KEY: &str = "pinnedPlayer";

pub const DEFAULT_THEME: &str = "ocean";

/// String key-value persistence, e.g. browser local storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Colour palette name.
    pub theme: String,
    pub dark_mode: bool,
    pub pinned_player: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            dark_mode: false,
            pinned_player: None,
        }
    }
}

impl Preferences {
    /// Read preferences, falling back to defaults for anything missing.
    ///
    /// Older saves kept only `theme = "light" | "dark"`; those are read as the
    /// dark-mode flag with the default palette.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let mut prefs = Preferences::default();
        let stored_theme = store.get(THEME_KEY).filter(|t| !t.is_empty());

        match (stored_theme.as_deref(), store.get(DARK_MODE_KEY)) {
            (Some(legacy @ ("light" | "dark")), None) => {
                prefs.dark_mode = legacy == "dark";
            }
            (theme, dark) => {
                if let Some(theme) = theme {
                    prefs.theme = theme.to_string();
                }
                prefs.dark_mode = dark.as_deref() == Some("true");
            }
        }

        prefs.pinned_player = store.get(PINNED_PLAYER_KEY).filter(|p| !p.is_empty());
        prefs
    }

    pub fn save(&self, store: &mut impl PreferenceStore) {
        store.set(THEME_KEY, &self.theme);
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" });
        match &self.pinned_player {
            Some(name) => store.set(PINNED_PLAYER_KEY, name),
            None => store.remove(PINNED_PLAYER_KEY),
        }
    }

    pub fn color_scheme(&self) -> &'static str {
        if self.dark_mode {
            "dark"
        } else {
            "light"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_gives_defaults() {
        assert_eq!(Preferences::load(&MemoryStore::default()), Preferences::default());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::default();
        let prefs = Preferences {
            theme: "forest".to_string(),
            dark_mode: true,
            pinned_player: Some("alice".to_string()),
        };
        prefs.save(&mut store);
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn clearing_the_pin_removes_the_key() {
        let mut store = MemoryStore::default();
        store.set(PINNED_PLAYER_KEY, "alice");
        Preferences::default().save(&mut store);
        assert_eq!(store.get(PINNED_PLAYER_KEY), None);
    }

    #[test]
    fn legacy_theme_value_maps_to_dark_mode() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "dark");
        let prefs = Preferences::load(&store);
        assert!(prefs.dark_mode);
        assert_eq!(prefs.theme, DEFAULT_THEME);
        assert_eq!(prefs.color_scheme(), "dark");
    }
}
