//! Thread-local store for player profiles fetched in the background.
//!
//! Profiles arrive after the first render and are only read by the detail
//! view, so they live outside the reducer state. A missing entry simply means
//! the player has no profile (or fetching it failed).

use leaderboard_viewer::enrichment::AgentProfile;
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    pub static PROFILE_STORE: RefCell<HashMap<String, AgentProfile>> =
        RefCell::new(HashMap::new());
}

pub fn store_profile(player: &str, profile: AgentProfile) {
    PROFILE_STORE.with(|c| {
        c.borrow_mut().insert(player.to_string(), profile);
    });
}

pub fn profile_for(player: &str) -> Option<AgentProfile> {
    PROFILE_STORE.with(|c| c.borrow().get(player).cloned())
}

pub fn profile_count() -> usize {
    PROFILE_STORE.with(|c| c.borrow().len())
}
