use std::collections::BTreeMap;
use std::fmt;

use crate::error::TodoError;

/// Tag name → palette value. Tags without an entry use `"default"`.
pub type TagColorMap = BTreeMap<String, String>;

/// Key of a tag group. Untagged tasks form a group of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Tagged(String),
    Untagged,
}

impl GroupKey {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if !t.is_empty() => GroupKey::Tagged(t.to_string()),
            _ => GroupKey::Untagged,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            GroupKey::Tagged(t) => Some(t),
            GroupKey::Untagged => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Tagged(t) => write!(f, "{}", t),
            GroupKey::Untagged => write!(f, "(untagged)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
    pub hex: &'static str,
}

pub const PALETTE: [PaletteColor; 10] = [
    PaletteColor { name: "Default", value: "default", hex: "#e0e0e0" },
    PaletteColor { name: "Gray", value: "gray", hex: "#9e9e9e" },
    PaletteColor { name: "Brown", value: "brown", hex: "#a1887f" },
    PaletteColor { name: "Orange", value: "orange", hex: "#ffb74d" },
    PaletteColor { name: "Yellow", value: "yellow", hex: "#fff176" },
    PaletteColor { name: "Green", value: "green", hex: "#81c784" },
    PaletteColor { name: "Blue", value: "blue", hex: "#64b5f6" },
    PaletteColor { name: "Purple", value: "purple", hex: "#ba68c8" },
    PaletteColor { name: "Pink", value: "pink", hex: "#f06292" },
    PaletteColor { name: "Red", value: "red", hex: "#e57373" },
];

impl PaletteColor {
    pub fn fallback() -> &'static PaletteColor {
        &PALETTE[0]
    }

    pub fn by_value(value: &str) -> Option<&'static PaletteColor> {
        PALETTE.iter().find(|c| c.value == value)
    }

    /// Look up a palette entry by value or display name, ignoring case.
    pub fn parse(s: &str) -> Result<&'static PaletteColor, TodoError> {
        let wanted = s.trim().to_lowercase();
        Self::by_value(&wanted).ok_or_else(|| TodoError::UnknownColor(s.to_string()))
    }

    /// Hex string as an RGB triple, for terminals that support true color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

/// Resolve the display color of a tag. Missing or unrecognized entries fall
/// back to the first palette entry.
pub fn resolve_tag_color(colors: &TagColorMap, tag: &str) -> &'static PaletteColor {
    let value = colors.get(tag).map(String::as_str).unwrap_or("default");
    PaletteColor::by_value(value).unwrap_or_else(PaletteColor::fallback)
}

/// Color for a whole group; untagged groups always use the fallback.
pub fn resolve_group_color(colors: &TagColorMap, key: &GroupKey) -> &'static PaletteColor {
    match key {
        GroupKey::Tagged(tag) => resolve_tag_color(colors, tag),
        GroupKey::Untagged => PaletteColor::fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_from_tag() {
        assert_eq!(GroupKey::from_tag(None), GroupKey::Untagged);
        assert_eq!(GroupKey::from_tag(Some("")), GroupKey::Untagged);
        assert_eq!(
            GroupKey::from_tag(Some("work")),
            GroupKey::Tagged("work".to_string())
        );
    }

    #[test]
    fn test_resolve_tag_color() {
        let mut colors = TagColorMap::new();
        colors.insert("work".to_string(), "blue".to_string());
        colors.insert("home".to_string(), "chartreuse".to_string());

        assert_eq!(resolve_tag_color(&colors, "work").hex, "#64b5f6");
        // Unknown palette value
        assert_eq!(resolve_tag_color(&colors, "home").name, "Default");
        // Missing entry
        assert_eq!(resolve_tag_color(&colors, "errands").value, "default");
    }

    #[test]
    fn test_palette_order_and_size() {
        assert_eq!(PALETTE.len(), 10);
        assert_eq!(PALETTE[0].value, "default");
        assert_eq!(PALETTE[9].value, "red");
    }

    #[test]
    fn test_parse_color() {
        let color = PaletteColor::parse("Green").unwrap();
        assert_eq!(color.value, "green");
        assert_eq!(
            PaletteColor::parse("teal").unwrap_err(),
            TodoError::UnknownColor("teal".to_string())
        );
    }

    #[test]
    fn test_rgb() {
        assert_eq!(PALETTE[0].rgb(), (0xe0, 0xe0, 0xe0));
        assert_eq!(PALETTE[9].rgb(), (0xe5, 0x73, 0x73));
    }
}
