//! Fixed color palette offered when recoloring a list.
//!
//! Colors remain opaque display tags; nothing rejects a value outside this
//! palette.

/// A named palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub value: &'static str,
}

pub const RED: &str = "#ef4444";
pub const ORANGE: &str = "#f97316";
pub const YELLOW: &str = "#f59e0b";
pub const GREEN: &str = "#10b981";
pub const BLUE: &str = "#3b82f6";
pub const PURPLE: &str = "#8b5cf6";
pub const PINK: &str = "#ec4899";
pub const GRAY: &str = "#94a3b8";

pub const PALETTE: [Swatch; 8] = [
    Swatch { name: "Red", value: RED },
    Swatch { name: "Orange", value: ORANGE },
    Swatch { name: "Yellow", value: YELLOW },
    Swatch { name: "Green", value: GREEN },
    Swatch { name: "Blue", value: BLUE },
    Swatch { name: "Purple", value: PURPLE },
    Swatch { name: "Pink", value: PINK },
    Swatch { name: "Gray", value: GRAY },
];

/// Looks up the display name of a palette color (case-insensitive)
pub fn palette_name(color: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|swatch| swatch.value.eq_ignore_ascii_case(color))
        .map(|swatch| swatch.name)
}
