//! Application-level configuration constants.

// Data sources
pub const STANDINGS_URL: &str = "data/final_standings.csv";
pub const PLAYER_INDEX_URL: &str = "data/players.json";

// UI Behavior
pub const SEARCH_DEBOUNCE_MS: u32 = 150;
pub const NOTICE_MS: u32 = 3000;
pub const EXPORT_FILENAME: &str = "tournament_results.csv";
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

// Colour palettes offered in the header
pub const PALETTES: [&str; 3] = ["ocean", "forest", "ember"];

// Chart canvases
pub const WIN_RATE_CANVAS: &str = "winRateChart";
pub const RATING_CANVAS: &str = "ratingChart";
pub const OUTCOME_CANVAS: &str = "gameStatsChart";
pub const SCATTER_CANVAS: &str = "ratingWinRateChart";
