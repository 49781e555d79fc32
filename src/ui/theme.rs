use crossterm::style::Color;

pub const TITLE: Color = Color::Rgb { r: 0xda, g: 0x77, b: 0x56 };
pub const MUTED: Color = Color::Rgb { r: 0x6b, g: 0x72, b: 0x80 };
pub const STATUS_ERROR: Color = Color::Rgb { r: 0xef, g: 0x44, b: 0x44 };
