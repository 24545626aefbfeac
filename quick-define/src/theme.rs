use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dark,
    Light,
}

/// Colors for one mode: gray backgrounds, a cyan accent for links and
/// phonetics, rose for errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: Mode,
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            mode: Mode::Dark,
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(249, 250, 251),
            accent: Color::Rgb(34, 211, 238),
            muted: Color::Rgb(156, 163, 175),
            error: Color::Rgb(244, 63, 94),
        }
    }

    pub const fn light() -> Self {
        Self {
            mode: Mode::Light,
            bg: Color::Rgb(243, 244, 246),
            fg: Color::Rgb(17, 24, 39),
            accent: Color::Rgb(14, 116, 144),
            muted: Color::Rgb(107, 114, 128),
            error: Color::Rgb(225, 29, 72),
        }
    }

    /// One-time system color-scheme query at startup; dark when detection
    /// fails.
    pub fn from_system() -> Self {
        if let Ok(dark_light::Mode::Light) = dark_light::detect() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn toggled(&self) -> Self {
        match self.mode {
            Mode::Dark => Self::light(),
            Mode::Light => Self::dark(),
        }
    }

    pub fn mode_label(&self) -> &'static str {
        match self.mode {
            Mode::Dark => "dark",
            Mode::Light => "light",
        }
    }
}
