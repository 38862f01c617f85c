use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Green;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::Blue;
pub const IPV6_ADDR: Color = Color::Cyan;
pub const PORT: Color = Color::Yellow;

pub const OPEN: Color = Color::Green;
pub const CLOSED: Color = Color::Red;
