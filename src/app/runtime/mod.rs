use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::{
    controller::ListController,
    domain::ListItem,
    form::{Draft, DraftField},
    presentation::{self, DraftRender, FieldRender, PickerRender, RowRender, UiContext},
    store::FieldStore,
};

use super::{
    input::{self, KeyAction, KeyCommand},
    keymap::{self, KeymapContext},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

mod draft_ops;
mod list_ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Draft,
}

pub(crate) struct App<S: FieldStore> {
    controller: ListController<S>,
    options: UiOptions,
    status: StatusLine,
    focus: Focus,
    selected: usize,
    field_cursor: usize,
    exit_armed: bool,
    should_quit: bool,
}

impl<S: FieldStore> App<S> {
    pub fn new(controller: ListController<S>, options: UiOptions) -> Self {
        let focus = if controller.items().is_empty() {
            Focus::Draft
        } else {
            Focus::List
        };
        Self {
            controller,
            options,
            status: StatusLine::new(),
            focus,
            selected: 0,
            field_cursor: 0,
            exit_armed: false,
            should_quit: false,
        }
    }

    /// Drive the widget until the user quits; returns the committed list.
    pub fn run(&mut self, terminal: &mut TerminalGuard) -> Result<Vec<ListItem>> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                self.on_tick();
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        Ok(self.controller.items().to_vec())
    }

    fn on_tick(&mut self) {
        if self.controller.refresh() {
            self.clamp_selection();
            self.status.external_change();
        }
    }

    fn context(&self) -> KeymapContext {
        match self.focus {
            Focus::List => KeymapContext::List,
            Focus::Draft if self.active_picker_expanded() => KeymapContext::Picker,
            Focus::Draft => KeymapContext::Draft,
        }
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        keymap::help_text(self.context())
    }

    fn current_field(&self) -> Option<DraftField> {
        let fields = self.controller.active_draft().fields();
        fields.get(self.field_cursor % fields.len().max(1)).copied()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match input::classify(self.context(), &key) {
            KeyCommand::Action(KeyAction::Quit) => self.on_exit(),
            KeyCommand::Action(action) => {
                self.exit_armed = false;
                self.handle_action(action);
            }
            KeyCommand::Input(event) => {
                self.exit_armed = false;
                self.handle_text_input(&event);
            }
            KeyCommand::None => {}
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.on_exit(),
            KeyAction::Save => self.on_save(),
            KeyAction::Cancel => self.on_cancel(),
            KeyAction::FocusToggle => self.toggle_focus(),
            KeyAction::Activate => {
                if !self.open_picker() {
                    self.on_save();
                }
            }
            KeyAction::FieldStep(delta) => self.step_field(delta),
            KeyAction::RowSelect(delta) => self.select_row(delta),
            KeyAction::RowMove(delta) => self.move_selected(delta),
            KeyAction::StartEdit => self.edit_selected(),
            KeyAction::DeleteRow => self.delete_selected(),
            KeyAction::PickerStep(delta) => self.step_picker(delta),
            KeyAction::PickerChoose => self.choose_from_picker(),
        }
    }

    fn toggle_focus(&mut self) {
        self.close_picker();
        self.focus = match self.focus {
            Focus::List => Focus::Draft,
            Focus::Draft => Focus::List,
        };
        if self.focus == Focus::Draft && !self.controller.is_editing() {
            self.status.editing("new entry");
        } else {
            self.status.ready();
        }
    }

    fn on_save(&mut self) {
        let was_editing = self.controller.is_editing();
        if self.controller.save_active() {
            self.status.saved();
            self.field_cursor = 0;
            if was_editing {
                self.focus = Focus::List;
            } else {
                self.selected = self.controller.items().len().saturating_sub(1);
            }
            return;
        }
        if was_editing && !self.controller.is_editing() {
            self.status
                .warn("The entry was removed elsewhere; edit discarded");
            self.focus = Focus::List;
            self.clamp_selection();
            return;
        }
        self.status.blocked(self.invalid_field_count());
    }

    fn on_cancel(&mut self) {
        if self.close_picker() {
            return;
        }
        let was_editing = self.controller.is_editing();
        self.controller.cancel_active();
        self.field_cursor = 0;
        if was_editing || !self.controller.items().is_empty() {
            self.focus = Focus::List;
        }
        self.status.ready();
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.has_unsaved_draft() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        debug!(count = self.controller.items().len(), "leaving repeater");
        self.should_quit = true;
    }

    fn has_unsaved_draft(&self) -> bool {
        if self.controller.is_editing() {
            return true;
        }
        let blank = Draft::blank(self.controller.options());
        let draft = self.controller.new_draft();
        draft.to_value() != blank.to_value() || draft.item_type() != blank.item_type()
    }

    fn invalid_field_count(&self) -> usize {
        let draft = self.controller.active_draft();
        draft
            .fields()
            .into_iter()
            .filter(|field| !draft.field_validation(*field).valid)
            .count()
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        let label = self.controller.options().label.clone();
        let title = self.options.title.clone().unwrap_or_else(|| label.clone());
        let editing_id = self.controller.pending_edit().map(|edit| edit.id().to_string());

        let rows = self
            .controller
            .items()
            .iter()
            .map(|item| RowRender {
                summary: item.summary(),
                item_type: item.item_type.clone(),
                actions: self.controller.row_actions(&item.id).unwrap_or_default(),
                editing: editing_id.as_deref() == Some(item.id.as_str()),
            })
            .collect::<Vec<_>>();

        let draft = self.controller.active_draft();
        let fields = field_renders(draft, &label);
        let heading = match &editing_id {
            Some(id) => match self.controller.items().iter().position(|item| &item.id == id) {
                Some(position) => format!("Editing entry {}", position + 1),
                None => "Editing entry".to_string(),
            },
            None => format!("New {label}"),
        };
        let cursor = (self.focus == Focus::Draft && !fields.is_empty())
            .then(|| self.field_cursor % fields.len());
        let picker = self.picker_render();

        presentation::draw(
            frame,
            UiContext {
                title: &title,
                rows: &rows,
                selected: (!rows.is_empty()).then_some(self.selected),
                list_focused: self.focus == Focus::List,
                draft: DraftRender {
                    heading,
                    fields: &fields,
                    cursor,
                },
                status_message: self.status.message(),
                status_tone: self.status.tone(),
                help: help.as_deref(),
                picker,
            },
        );
    }

    fn picker_render(&self) -> Option<PickerRender<'_>> {
        let picker = self.active_picker()?;
        if !picker.is_expanded() {
            return None;
        }
        Some(PickerRender {
            title: picker.label(),
            filter: picker.filter().unwrap_or_default(),
            options: picker.filtered(),
            selected: picker.highlighted().unwrap_or(0),
        })
    }
}

fn field_renders(draft: &Draft, value_label: &str) -> Vec<FieldRender> {
    draft
        .fields()
        .into_iter()
        .map(|field| {
            let validation = draft.field_validation(field);
            let picker = match (draft.as_address_editor(), field) {
                (Some(editor), DraftField::Address(address_field)) => editor.picker(address_field),
                _ => None,
            };
            let raw = draft.get(field).unwrap_or_default();
            let (value, placeholder) = match picker {
                Some(picker) if raw.is_empty() => (picker.placeholder(), true),
                _ => (raw.to_string(), false),
            };
            FieldRender {
                label: field.label(value_label),
                value,
                placeholder,
                error: (!validation.valid).then_some(validation.message),
                choice: picker.is_some(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
