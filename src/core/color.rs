// imgtool/src/core/color.rs
use super::{ImgToolError, Result};
use std::fmt;
use std::str::FromStr;

/// An RGB triple parsed from `#RRGGBB` or `#RGB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Every channel lies within `tolerance` of this color (an L-infinity bound).
    pub fn matches(&self, rgb: [u8; 3], tolerance: u8) -> bool {
        self.r.abs_diff(rgb[0]) <= tolerance
            && self.g.abs_diff(rgb[1]) <= tolerance
            && self.b.abs_diff(rgb[2]) <= tolerance
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ImgToolError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let invalid = || ImgToolError::InvalidColorFormat(token.to_string());

        let digits = token.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Parses one hex color or a comma-separated list of them.
///
/// Blank input (and blank entries between commas) contribute nothing. Any malformed token
/// fails the whole parse.
pub fn parse_colors(text: &str) -> Result<Vec<HexColor>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(HexColor::from_str)
        .collect()
}
