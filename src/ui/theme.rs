use ratatui::style::Color;

use crate::inspector::Icon;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub type_name: Color, // Cyan for type labels
    pub primitive: Color,
    pub array: Color,
    pub container: Color,
}

impl Theme {
    /// Color for values of the given icon class
    pub fn icon_color(&self, icon: Icon) -> Color {
        match icon {
            Icon::PrimitiveValue => self.primitive,
            Icon::Array => self.array,
            Icon::Value => self.container,
        }
    }
}

/// Glyph drawn for an icon class
pub fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::PrimitiveValue => "●",
        Icon::Array => "▤",
        Icon::Value => "◆",
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Selected row
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal for type labels
    primitive: Color::Rgb(250, 179, 135),      // Orange, like numbers
    array: Color::Rgb(137, 180, 250),
    container: Color::Rgb(245, 194, 231),
};
