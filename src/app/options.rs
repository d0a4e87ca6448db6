use std::time::Duration;

/// Terminal front end settings. Widget behaviour lives in
/// [`WidgetOptions`](crate::WidgetOptions).
#[derive(Debug, Clone)]
pub struct UiOptions {
    /// How long to wait for input before polling the store again.
    pub tick_rate: Duration,
    pub confirm_exit: bool,
    pub show_help: bool,
    pub title: Option<String>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            confirm_exit: true,
            show_help: true,
            title: None,
        }
    }
}

impl UiOptions {
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
