/// Filterable single-choice picker over a fixed candidate list.
///
/// Collapsed, it only shows the bound value (or a placeholder). Expanded, a
/// text filter narrows the candidates by case-insensitive substring. The
/// widget never owns the bound value: a selection is handed back to the
/// caller, which writes it into its draft and calls [`sync_value`].
///
/// [`sync_value`]: SelectionWidget::sync_value
#[derive(Debug, Clone)]
pub struct SelectionWidget {
    label: String,
    candidates: Vec<String>,
    value: String,
    mode: PickerMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PickerMode {
    Collapsed,
    Expanded { filter: String, highlighted: usize },
}

impl SelectionWidget {
    pub fn new(label: impl Into<String>, candidates: Vec<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            candidates,
            value: value.into(),
            mode: PickerMode::Collapsed,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.mode, PickerMode::Expanded { .. })
    }

    pub fn placeholder(&self) -> String {
        format!("Click to select a {}", self.label)
    }

    /// Text shown in collapsed mode.
    pub fn display(&self) -> String {
        if self.value.is_empty() {
            self.placeholder()
        } else {
            self.value.clone()
        }
    }

    /// Flip between collapsed and expanded. Expanding starts from an empty
    /// filter showing every candidate.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            PickerMode::Collapsed => PickerMode::Expanded {
                filter: String::new(),
                highlighted: 0,
            },
            PickerMode::Expanded { .. } => PickerMode::Collapsed,
        };
    }

    pub fn collapse(&mut self) {
        self.mode = PickerMode::Collapsed;
    }

    pub fn filter(&self) -> Option<&str> {
        match &self.mode {
            PickerMode::Expanded { filter, .. } => Some(filter),
            PickerMode::Collapsed => None,
        }
    }

    /// Replace the filter text. Ignored while collapsed.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        if let PickerMode::Expanded {
            filter,
            highlighted,
        } = &mut self.mode
        {
            *filter = text.into();
            *highlighted = 0;
        }
    }

    pub fn push_filter_char(&mut self, ch: char) {
        if let Some(current) = self.filter() {
            let next = format!("{current}{ch}");
            self.set_filter(next);
        }
    }

    pub fn pop_filter_char(&mut self) {
        if let Some(current) = self.filter() {
            let mut next = current.to_string();
            next.pop();
            self.set_filter(next);
        }
    }

    /// Candidates matching the current filter, in table order.
    pub fn filtered(&self) -> Vec<&str> {
        let needle = self.filter().unwrap_or_default().to_lowercase();
        self.candidates
            .iter()
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn highlighted(&self) -> Option<usize> {
        match &self.mode {
            PickerMode::Expanded { highlighted, .. } => Some(*highlighted),
            PickerMode::Collapsed => None,
        }
    }

    pub fn highlight_next(&mut self) {
        self.step_highlight(1);
    }

    pub fn highlight_previous(&mut self) {
        self.step_highlight(-1);
    }

    fn step_highlight(&mut self, delta: i32) {
        let len = self.filtered().len() as i32;
        if let PickerMode::Expanded { highlighted, .. } = &mut self.mode {
            if len == 0 {
                *highlighted = 0;
                return;
            }
            let next = (*highlighted as i32 + delta).rem_euclid(len);
            *highlighted = next as usize;
        }
    }

    /// Commit a candidate. Returns the chosen value for the caller to store;
    /// `None` when the value is not a candidate or the picker is collapsed.
    pub fn select(&mut self, candidate: &str) -> Option<String> {
        if !self.is_expanded() {
            return None;
        }
        let chosen = self
            .candidates
            .iter()
            .find(|existing| existing.as_str() == candidate)?
            .clone();
        self.value = chosen.clone();
        self.mode = PickerMode::Collapsed;
        Some(chosen)
    }

    pub fn select_highlighted(&mut self) -> Option<String> {
        let index = self.highlighted()?;
        let candidate = self.filtered().get(index)?.to_string();
        self.select(&candidate)
    }

    /// Track the bound value. A value changed from outside collapses the picker.
    pub fn sync_value(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.mode = PickerMode::Collapsed;
        }
    }

    /// Swap the candidate list (e.g. provinces of a newly picked country).
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        if let PickerMode::Expanded {
            filter,
            highlighted,
        } = &mut self.mode
        {
            filter.clear();
            *highlighted = 0;
        }
    }
}
