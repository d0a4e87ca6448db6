use anyhow::Result;
use tracing::info;

use crate::{
    controller::ListController,
    domain::{ListItem, WidgetOptions},
    store::FieldStore,
};

use super::{options::UiOptions, runtime::App, terminal::TerminalGuard};

/// Terminal host for one repeater widget bound to `store`.
#[derive(Debug)]
pub struct RepeaterUI<S: FieldStore> {
    store: S,
    widget: WidgetOptions,
    options: UiOptions,
}

impl<S: FieldStore> RepeaterUI<S> {
    pub fn new(store: S, widget: WidgetOptions) -> Self {
        Self {
            store,
            widget,
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Take over the terminal until the user quits. Every save is written to
    /// the store as it happens; the returned list is the final committed state.
    pub fn run(self) -> Result<Vec<ListItem>> {
        let RepeaterUI {
            store,
            widget,
            options,
        } = self;

        let mut terminal = TerminalGuard::new()?;
        let controller = ListController::mount_on(store, widget, &mut terminal);
        info!(count = controller.items().len(), "repeater mounted");
        let mut app = App::new(controller, options);
        let outcome = app.run(&mut terminal);
        terminal.restore();
        outcome
    }
}
