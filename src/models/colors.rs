use std::{fmt, str::FromStr};

use crate::error::CatalogError;

pub const DEFAULT_COLOR: &str = "#3b82f6";

/// A `#rrggbb` color as stored in a `CHAR(7)` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse<S: AsRef<str>>(s: S) -> Result<Self, CatalogError> {
        let s = s.as_ref().trim();
        let mut chars = s.chars();
        let well_formed = s.len() == 7
            && chars.next() == Some('#')
            && chars.all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return Err(CatalogError::violation(format!(
                "color '{}' is not a #rrggbb hex color",
                s
            )));
        }
        Ok(HexColor(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor(DEFAULT_COLOR.to_string())
    }
}

impl FromStr for HexColor {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexColor::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
