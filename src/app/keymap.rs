use std::{collections::HashMap, str::FromStr, sync::LazyLock};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use thiserror::Error;

use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// Where keyboard focus sits; bindings are scoped to one or more of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeymapContext {
    List,
    Draft,
    Picker,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComboError {
    #[error("combo is empty")]
    Empty,
    #[error("unknown modifier '{0}'")]
    Modifier(String),
    #[error("unknown key '{0}'")]
    Key(String),
}

#[derive(Deserialize)]
struct RawEntry {
    description: String,
    contexts: Vec<KeymapContext>,
    action: RawAction,
    combos: Vec<KeyPattern>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Save,
    Quit,
    Cancel,
    FocusToggle,
    Activate,
    FieldStep { delta: i32 },
    RowSelect { delta: i32 },
    RowMove { delta: i32 },
    StartEdit,
    DeleteRow,
    PickerStep { delta: i32 },
    PickerChoose,
}

impl From<RawAction> for KeyAction {
    fn from(raw: RawAction) -> Self {
        match raw {
            RawAction::Save => KeyAction::Save,
            RawAction::Quit => KeyAction::Quit,
            RawAction::Cancel => KeyAction::Cancel,
            RawAction::FocusToggle => KeyAction::FocusToggle,
            RawAction::Activate => KeyAction::Activate,
            RawAction::FieldStep { delta } => KeyAction::FieldStep(delta),
            RawAction::RowSelect { delta } => KeyAction::RowSelect(delta),
            RawAction::RowMove { delta } => KeyAction::RowMove(delta),
            RawAction::StartEdit => KeyAction::StartEdit,
            RawAction::DeleteRow => KeyAction::DeleteRow,
            RawAction::PickerStep { delta } => KeyAction::PickerStep(delta),
            RawAction::PickerChoose => KeyAction::PickerChoose,
        }
    }
}

/// One key combination such as `Ctrl+S` or `Alt+Down`.
///
/// Letters match either case, so `D` also fires with Shift held.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
struct KeyPattern {
    code: KeyCode,
    modifiers: KeyModifiers,
    label: String,
}

impl FromStr for KeyPattern {
    type Err = ComboError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let label = raw.trim();
        let mut parts = label.rsplit('+').map(str::trim);
        let key = parts.next().filter(|key| !key.is_empty()).ok_or(ComboError::Empty)?;
        let modifiers = parts.try_fold(KeyModifiers::NONE, |acc, part| {
            let modifier = match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(ComboError::Modifier(part.to_string())),
            };
            Ok(acc | modifier)
        })?;
        Ok(Self {
            code: parse_code(key)?,
            modifiers,
            label: label.to_string(),
        })
    }
}

impl TryFrom<String> for KeyPattern {
    type Error = ComboError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl KeyPattern {
    fn matches(&self, key: &KeyEvent) -> bool {
        let (code, mut modifiers) = match key.code {
            KeyCode::Char(ch) => (KeyCode::Char(ch.to_ascii_lowercase()), key.modifiers),
            other => (other, key.modifiers),
        };
        // Terminals report Shift alongside upper-case letters and BackTab.
        if matches!(code, KeyCode::Char(_) | KeyCode::BackTab)
            && !self.modifiers.contains(KeyModifiers::SHIFT)
        {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        code == self.code && modifiers == self.modifiers
    }
}

fn parse_code(key: &str) -> Result<KeyCode, ComboError> {
    let code = match key.to_ascii_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "delete" | "del" => KeyCode::Delete,
        "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        single => {
            let mut chars = single.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(ComboError::Key(key.to_string())),
            }
        }
    };
    Ok(code)
}

struct Keymap {
    bindings: Vec<(Vec<KeymapContext>, Vec<KeyPattern>, KeyAction)>,
    help: HashMap<KeymapContext, String>,
}

impl Keymap {
    fn from_entries(entries: Vec<RawEntry>) -> Self {
        let mut help: HashMap<KeymapContext, Vec<String>> = HashMap::new();
        let mut bindings = Vec::with_capacity(entries.len());
        for entry in entries {
            let keys = entry
                .combos
                .iter()
                .map(|combo| combo.label.as_str())
                .collect::<Vec<_>>()
                .join("/");
            for context in &entry.contexts {
                help.entry(*context)
                    .or_default()
                    .push(format!("{keys} {}", entry.description));
            }
            bindings.push((entry.contexts, entry.combos, entry.action.into()));
        }
        let help = help
            .into_iter()
            .map(|(context, snippets)| (context, snippets.join(" • ")))
            .collect();
        Self { bindings, help }
    }
}

static KEYMAP: LazyLock<Keymap> = LazyLock::new(|| {
    let entries: Vec<RawEntry> =
        serde_json::from_str(keymap_source!()).expect("invalid keymap/default.keymap.json");
    Keymap::from_entries(entries)
});

/// First binding in `context` that fires for `key`.
pub fn classify_key(context: KeymapContext, key: &KeyEvent) -> Option<KeyAction> {
    KEYMAP
        .bindings
        .iter()
        .filter(|(contexts, _, _)| contexts.contains(&context))
        .find(|(_, combos, _)| combos.iter().any(|combo| combo.matches(key)))
        .map(|(_, _, action)| *action)
}

pub fn help_text(context: KeymapContext) -> Option<String> {
    KEYMAP.help.get(&context).cloned()
}
