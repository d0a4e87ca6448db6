use crate::presentation::StatusTone;

pub const READY_STATUS: &str = "Ready. Tab to add an entry, Enter to edit the selected one.";

/// Footer message plus how loudly to show it.
#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
    tone: StatusTone,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
            tone: StatusTone::Info,
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.set(StatusTone::Info, msg);
    }

    /// An action was refused; the user has to do something first.
    pub fn warn(&mut self, msg: impl Into<String>) {
        self.set(StatusTone::Warning, msg);
    }

    pub fn ready(&mut self) {
        self.info(READY_STATUS);
    }

    pub fn editing(&mut self, label: &str) {
        self.info(format!("Editing {label}"));
    }

    pub fn saved(&mut self) {
        self.set(StatusTone::Success, "Saved");
    }

    pub fn blocked(&mut self, count: usize) {
        self.warn(format!("{count} field(s) need attention before saving"));
    }

    pub fn external_change(&mut self) {
        self.info("List changed elsewhere; reloaded");
    }

    pub fn pending_exit(&mut self) {
        self.warn("Unsaved draft. Press Ctrl+Q again to quit and discard it.");
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tone(&self) -> StatusTone {
        self.tone
    }

    fn set(&mut self, tone: StatusTone, msg: impl Into<String>) {
        self.tone = tone;
        self.message = msg.into();
    }
}
