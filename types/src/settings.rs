//! Start page settings shared by the grid, the search bar and the backup panel.
//!
//! Every field carries a serde default so that slots written by older builds
//! (missing fields) still load. Strict field checks for untrusted import
//! documents live in the backup validator, not here.

use serde::{Deserialize, Serialize};

/// Grid layout consumed read-only by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// Tile icon edge in px.
    pub icon_size: u32,
    /// Horizontal gap in px.
    pub gap_x: u32,
    /// Vertical gap in px.
    pub gap_y: u32,
}

impl GridConfig {
    pub const ICON_SIZE_MIN: u32 = 40;
    pub const ICON_SIZE_MAX: u32 = 120;
    pub const GAP_MAX: u32 = 64;

    /// Clamp to the ranges the layout controls offer.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.max(1),
            cols: self.cols.max(1),
            icon_size: self
                .icon_size
                .clamp(Self::ICON_SIZE_MIN, Self::ICON_SIZE_MAX),
            gap_x: self.gap_x.min(Self::GAP_MAX),
            gap_y: self.gap_y.min(Self::GAP_MAX),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 8,
            icon_size: 84,
            gap_x: 0,
            gap_y: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    #[default]
    Google,
    Bing,
    Baidu,
    Zhihu,
    Github,
    Bilibili,
}

impl SearchEngine {
    pub const ALL: [Self; 6] = [
        Self::Google,
        Self::Bing,
        Self::Baidu,
        Self::Zhihu,
        Self::Github,
        Self::Bilibili,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::Baidu => "baidu",
            Self::Zhihu => "zhihu",
            Self::Github => "github",
            Self::Bilibili => "bilibili",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestServer {
    #[default]
    Auto,
    Google,
    Bing,
    Baidu,
    Custom,
}

impl SuggestServer {
    pub const ALL: [Self; 5] = [
        Self::Auto,
        Self::Google,
        Self::Bing,
        Self::Baidu,
        Self::Custom,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Google => "google",
            Self::Bing => "bing",
            Self::Baidu => "baidu",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Data URL or remote URL of a custom wallpaper.
    pub background_image: Option<String>,
    pub blur_level: f64,
    pub grid_config: GridConfig,
    pub default_engine: SearchEngine,
    pub open_in_new_tab: bool,
    pub suggest_server: SuggestServer,
    pub custom_suggest_url: Option<String>,
}

impl AppSettings {
    pub const BLUR_MAX: f64 = 20.0;

    /// Settings with grid and blur values pulled into their UI ranges.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.grid_config = self.grid_config.clamped();
        self.blur_level = if self.blur_level.is_finite() {
            self.blur_level.clamp(0.0, Self::BLUR_MAX)
        } else {
            0.0
        };
        self
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            background_image: None,
            blur_level: 1.0,
            grid_config: GridConfig::default(),
            default_engine: SearchEngine::Google,
            open_in_new_tab: true,
            suggest_server: SuggestServer::Auto,
            custom_suggest_url: None,
        }
    }
}
