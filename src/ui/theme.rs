use ratatui::style::Color;

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
    pub bar: Color,       // Unmarked array/heap values
    pub compare: Color,   // Elements under comparison or highlighted
    pub visited: Color,   // Visited graph nodes and tree nodes
    pub path: Color,      // Edges on a shortest path
    pub tentative: Color, // Graph nodes with a known distance
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
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    bar: Color::Rgb(137, 180, 250),
    compare: Color::Rgb(249, 226, 175),
    visited: Color::Rgb(166, 227, 161),
    path: Color::Rgb(245, 194, 231),
    tentative: Color::Rgb(148, 226, 213),
};
