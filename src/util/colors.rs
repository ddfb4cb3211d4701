use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00e0a458);
pub const SECONDARY: Color = Color::from_u32(0x008c6a3f);
pub const NEUTRAL: Color = Color::from_u32(0x005a5a5a);
pub const BACKGROUND: Color = Color::from_u32(0x00121212);
pub const ACCENT: Color = Color::from_u32(0x009cc9a1);
pub const ERROR: Color = Color::from_u32(0x00e06c6c);
