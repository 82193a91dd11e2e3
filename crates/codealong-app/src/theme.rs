// Presentation theme. Has no effect on layout or preview output.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// CSS class applied to the app root.
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Color scheme name handed to the embedded code editor.
    pub fn editor_theme(self) -> &'static str {
        match self {
            Theme::Light => "vs-light",
            Theme::Dark => "vs-dark",
        }
    }
}
