use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const NODE: Color = Color::BrightBlue;
pub const LINK: Color = Color::TrueColor { r: 192, g: 192, b: 192 };
pub const COMPLETE: Color = Color::Green;
pub const EMPTY: Color = Color::Yellow;
pub const FAILED: Color = Color::Red;
