//! Countdown text surface shown while an auto-resume is pending

pub trait CountdownDisplay {
    /// Make the surface visible with the given text
    fn show(&mut self, text: &str);

    /// Hide the surface; harmless when already hidden
    fn hide(&mut self);
}

/// Display that remembers every message it was asked to show
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    text: String,
    visible: bool,
    history: Vec<String>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Text currently on the surface (kept after hiding, like a hidden element)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl CountdownDisplay for RecordingDisplay {
    fn show(&mut self, text: &str) {
        self.text = text.to_string();
        self.visible = true;
        self.history.push(self.text.clone());
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}
