use codealong_core::{Panel, PanelMap};

/// Which panels are currently shown. All three start visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    flags: PanelMap<bool>,
}

impl Visibility {
    pub fn all_visible() -> Self {
        Self {
            flags: PanelMap::new(true, true, true),
        }
    }

    pub fn from_flags(flags: PanelMap<bool>) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> PanelMap<bool> {
        self.flags
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.flags[panel]
    }

    pub fn set_visible(&mut self, panel: Panel, visible: bool) {
        self.flags[panel] = visible;
    }

    /// Flip one panel's flag and return the new value.
    pub fn toggle(&mut self, panel: Panel) -> bool {
        let flag = &mut self.flags[panel];
        *flag = !*flag;
        *flag
    }

    /// Visible panels in canonical order (video, editor, preview).
    pub fn visible_panels(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| self.flags[*p])
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        Panel::ALL.into_iter().filter(|p| self.flags[*p]).count()
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::all_visible()
    }
}
