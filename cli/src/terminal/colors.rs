use colored::Color;

pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const HINT: Color = Color::Yellow;
pub const PAIR_MODE: Color = Color::Green;
pub const CONNECT_MODE: Color = Color::Blue;
