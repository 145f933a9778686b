use crate::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollbarStyle {
    pub width: u32,
    pub track: Color,
    pub handle: Color,
    pub handle_hovered: Color,
    pub handle_active: Color,
    pub corner_radius: f32,
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self {
            width: 10,
            track: Color::from_hex("#1E1E1E"),
            handle: Color::from_hex("#5A5A5A"),
            handle_hovered: Color::from_hex("#7A7A7A"),
            handle_active: Color::from_hex("#9A9A9A"),
            corner_radius: 4.0,
        }
    }
}

/// Defaults shared by the containers that draw chrome of their own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub scrollbar: ScrollbarStyle,
    pub popup_background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            scrollbar: ScrollbarStyle::default(),
            popup_background: Color::from_hex("#2B2B2BF0"),
        }
    }
}
