use serde::{Deserialize, Serialize};

/// Number of shades in every color ramp
pub const RAMP_LEN: usize = 5;

/// Five shades of one semantic color, strongest first.
pub type ColorRamp = [String; RAMP_LEN];

/// Color ramps for every semantic role of one variant (dark or lite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Palette {
    pub accent: ColorRamp,
    pub background: ColorRamp,
    pub background_shade: ColorRamp,
    pub text: ColorRamp,
    pub text_shade: ColorRamp,
    pub balance: ColorRamp,
}

/// A named theme with a dark and a lite variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub dark: Palette,
    pub lite: Palette,
}
