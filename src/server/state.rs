use crate::locate::Locator;

/// Shared by every request. The gazetteer is immutable, so no lock.
pub struct AppState {
    pub locator: Locator,
}
