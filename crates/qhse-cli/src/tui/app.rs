use crate::aggregates;
use crate::display::{statuses_for, view_for};
use crate::tui::worker::{ApiFailure, ApiRequest, ApiResponse};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use qhse_forms::{
    add_item, apply_edit, entities::schema_for, get_path, new_draft, remove_item_by_key,
    seed_from, to_wire_payload, validate, FieldKind, FormSchema, ITEM_KEY,
};
use qhse_types::{Module, ModuleStats, Periode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// How long a submitted form shows its success banner before closing
/// itself. Closing the modal earlier cancels the timer.
pub const SUCCESS_CLOSE: Duration = Duration::from_millis(1500);

const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Stats,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub error: bool,
    pub expires: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// One visual row of the form modal. Headers are skipped by focus moves.
#[derive(Debug, Clone)]
pub enum FormRow {
    Field {
        path: String,
        kind: FieldKind,
        label: String,
        options: &'static [&'static str],
    },
    GroupHeader {
        group: &'static str,
        label: String,
    },
    ItemField {
        group: &'static str,
        key: String,
        path: String,
        kind: FieldKind,
        label: String,
        options: &'static [&'static str],
    },
}

impl FormRow {
    pub fn focusable(&self) -> bool {
        !matches!(self, FormRow::GroupHeader { .. })
    }
}

pub struct FormState {
    pub module: Module,
    pub mode: FormMode,
    pub schema: FormSchema,
    pub draft: Value,
    pub errors: Vec<String>,
    pub input_error: Option<String>,
    /// Index into `rows()`, always pointing at a focusable row.
    pub cursor: usize,
    pub submitting: bool,
    pub success_close: Option<Instant>,
}

enum FormAction {
    None,
    Close,
    Submit(ApiRequest),
}

impl FormState {
    pub fn create(module: Module) -> Self {
        let schema = schema_for(module);
        let draft = new_draft(&schema);
        Self::with_draft(module, FormMode::Create, schema, draft)
    }

    pub fn edit(module: Module, id: String, entity: &Value) -> Self {
        let schema = schema_for(module);
        let draft = seed_from(&schema, entity);
        Self::with_draft(module, FormMode::Edit { id }, schema, draft)
    }

    fn with_draft(module: Module, mode: FormMode, schema: FormSchema, draft: Value) -> Self {
        let mut form = Self {
            module,
            mode,
            schema,
            draft,
            errors: Vec::new(),
            input_error: None,
            cursor: 0,
            submitting: false,
            success_close: None,
        };
        form.snap_cursor(1);
        form
    }

    /// Flatten schema + draft into the rows the modal renders. Group items
    /// expand to one row per item field, addressed positionally.
    pub fn rows(&self) -> Vec<FormRow> {
        let mut rows = Vec::new();
        for field in &self.schema.fields {
            rows.push(FormRow::Field {
                path: field.name.to_string(),
                kind: field.kind,
                label: field.label.to_string(),
                options: field.options,
            });
        }
        for group in &self.schema.groups {
            rows.push(FormRow::GroupHeader {
                group: group.name,
                label: group.label.to_string(),
            });
            let items = get_path(&self.draft, group.name)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for (index, item) in items.iter().enumerate() {
                let key = item
                    .get(ITEM_KEY)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                for field in &group.item_fields {
                    rows.push(FormRow::ItemField {
                        group: group.name,
                        key: key.clone(),
                        path: format!("{}.{}.{}", group.name, index, field.name),
                        kind: field.kind,
                        label: format!("{} {} · {}", group.label, index + 1, field.label),
                        options: field.options,
                    });
                }
            }
        }
        rows
    }

    pub fn focused(&self) -> Option<FormRow> {
        self.rows().into_iter().nth(self.cursor)
    }

    /// Current value of a field rendered back as the editable raw string.
    pub fn raw_value(&self, path: &str) -> String {
        match get_path(&self.draft, path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => {
                let number = n.as_f64().unwrap_or(0.0);
                if number == 0.0 {
                    String::new()
                } else if number.fract() == 0.0 {
                    format!("{}", number as i64)
                } else {
                    format!("{}", number)
                }
            }
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let rows = self.rows();
        if rows.is_empty() {
            return;
        }
        let mut cursor = self.cursor as isize;
        loop {
            cursor += delta;
            if cursor < 0 || cursor as usize >= rows.len() {
                return;
            }
            if rows[cursor as usize].focusable() {
                self.cursor = cursor as usize;
                return;
            }
        }
    }

    /// Place the cursor on the nearest focusable row, scanning in
    /// `direction` (+1 or -1).
    fn snap_cursor(&mut self, direction: isize) {
        let rows = self.rows();
        let mut cursor = self.cursor.min(rows.len().saturating_sub(1)) as isize;
        while cursor >= 0 && (cursor as usize) < rows.len() {
            if rows[cursor as usize].focusable() {
                self.cursor = cursor as usize;
                return;
            }
            cursor += direction;
        }
        self.cursor = 0;
    }

    fn edit_raw(&mut self, path: &str, kind: FieldKind, raw: &str) {
        match apply_edit(&mut self.draft, path, raw, kind) {
            Ok(()) => self.input_error = None,
            // Invalid keystrokes (e.g. letters in a number field) leave the
            // draft untouched.
            Err(err) => self.input_error = Some(err.to_string()),
        }
    }

    fn input_char(&mut self, c: char) {
        let Some(row) = self.focused() else {
            return;
        };
        let (path, kind, options) = match &row {
            FormRow::Field {
                path,
                kind,
                options,
                ..
            }
            | FormRow::ItemField {
                path,
                kind,
                options,
                ..
            } => (path.clone(), *kind, *options),
            FormRow::GroupHeader { .. } => return,
        };
        match kind {
            FieldKind::Select => {
                if c == ' ' {
                    self.cycle_option(&path, kind, options, 1);
                }
            }
            FieldKind::Checkbox => {
                if c == ' ' {
                    self.toggle_checkbox(&path);
                }
            }
            _ => {
                let mut raw = self.raw_value(&path);
                raw.push(c);
                self.edit_raw(&path, kind, &raw);
            }
        }
    }

    fn backspace(&mut self) {
        let Some(row) = self.focused() else {
            return;
        };
        if let FormRow::Field { path, kind, .. } | FormRow::ItemField { path, kind, .. } = row {
            if matches!(kind, FieldKind::Select | FieldKind::Checkbox) {
                return;
            }
            let mut raw = self.raw_value(&path);
            raw.pop();
            self.edit_raw(&path, kind, &raw);
        }
    }

    fn cycle_option(
        &mut self,
        path: &str,
        kind: FieldKind,
        options: &'static [&'static str],
        delta: isize,
    ) {
        if options.is_empty() {
            return;
        }
        let current = self.raw_value(path);
        let position = options.iter().position(|o| *o == current);
        let next = match position {
            Some(index) => {
                (index as isize + delta).rem_euclid(options.len() as isize) as usize
            }
            None => 0,
        };
        self.edit_raw(path, kind, options[next]);
    }

    fn toggle_checkbox(&mut self, path: &str) {
        let current = get_path(&self.draft, path)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let raw = if current { "false" } else { "true" };
        self.edit_raw(path, FieldKind::Checkbox, raw);
    }

    fn sideways(&mut self, delta: isize) {
        let Some(row) = self.focused() else {
            return;
        };
        if let FormRow::Field {
            path,
            kind,
            options,
            ..
        }
        | FormRow::ItemField {
            path,
            kind,
            options,
            ..
        } = row
        {
            match kind {
                FieldKind::Select => self.cycle_option(&path, kind, options, delta),
                FieldKind::Checkbox => self.toggle_checkbox(&path),
                _ => {}
            }
        }
    }

    /// Add an item to the group under the cursor, or the first group.
    fn add_group_item(&mut self) {
        let group_name = match self.focused() {
            Some(FormRow::ItemField { group, .. }) | Some(FormRow::GroupHeader { group, .. }) => {
                Some(group)
            }
            _ => self.schema.groups.first().map(|g| g.name),
        };
        let Some(group_name) = group_name else {
            return;
        };
        let Some(group) = self.schema.group(group_name).cloned() else {
            return;
        };
        if let Err(err) = add_item(&mut self.draft, &group) {
            self.input_error = Some(err.to_string());
        }
    }

    /// Remove the item under the cursor by its stable key, so a concurrent
    /// reflow of the list cannot make the removal hit a sibling.
    fn remove_group_item(&mut self) {
        let Some(FormRow::ItemField { group, key, .. }) = self.focused() else {
            return;
        };
        if key.is_empty() {
            return;
        }
        if let Err(err) = remove_item_by_key(&mut self.draft, group, &key) {
            self.input_error = Some(err.to_string());
        }
        self.snap_cursor(-1);
    }

    fn submit(&mut self) -> FormAction {
        if self.submitting {
            return FormAction::None;
        }
        self.errors = validate(&self.schema, &self.draft);
        if !self.errors.is_empty() {
            return FormAction::None;
        }
        let payload = to_wire_payload(&self.schema, &self.draft);
        self.submitting = true;
        let request = match &self.mode {
            FormMode::Create => ApiRequest::Create {
                module: self.module,
                payload,
            },
            FormMode::Edit { id } => ApiRequest::Update {
                module: self.module,
                id: id.clone(),
                payload,
            },
        };
        FormAction::Submit(request)
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => return self.submit(),
                KeyCode::Char('a') => self.add_group_item(),
                KeyCode::Char('d') => self.remove_group_item(),
                _ => {}
            }
            return FormAction::None;
        }
        match key.code {
            KeyCode::Esc => FormAction::Close,
            KeyCode::Up => {
                self.move_focus(-1);
                FormAction::None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_focus(1);
                FormAction::None
            }
            KeyCode::Left => {
                self.sideways(-1);
                FormAction::None
            }
            KeyCode::Right => {
                self.sideways(1);
                FormAction::None
            }
            KeyCode::Backspace => {
                self.backspace();
                FormAction::None
            }
            KeyCode::Char(c) => {
                self.input_char(c);
                FormAction::None
            }
            _ => FormAction::None,
        }
    }
}

pub struct ConfirmState {
    pub module: Module,
    pub id: String,
    pub label: String,
}

pub enum Modal {
    Form(FormState),
    Confirm(ConfirmState),
    /// Read-only view of one entity; Esc is the only action.
    Detail { module: Module, entity: Value },
}

pub struct AppState {
    pub module: Module,
    pub screen: Screen,
    pub rows: Vec<Value>,
    pub counts: BTreeMap<String, u64>,
    /// Position within the visible (search-filtered) rows.
    pub selected: usize,
    pub search: String,
    pub search_active: bool,
    pub status_filter: Option<&'static str>,
    pub loading: bool,
    pub generation: u64,
    pub stats: Option<ModuleStats>,
    pub stats_generation: u64,
    pub periode: Periode,
    pub modals: Vec<Modal>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(module: Module) -> (Self, ApiRequest) {
        let mut state = Self {
            module,
            screen: Screen::List,
            rows: Vec::new(),
            counts: BTreeMap::new(),
            selected: 0,
            search: String::new(),
            search_active: false,
            status_filter: None,
            loading: false,
            generation: 0,
            stats: None,
            stats_generation: 0,
            periode: Periode::TrenteJours,
            modals: Vec::new(),
            notice: None,
            should_quit: false,
        };
        let initial = state.refetch();
        (state, initial)
    }

    /// Issue a fresh list fetch, superseding any in flight.
    pub fn refetch(&mut self) -> ApiRequest {
        self.generation += 1;
        self.loading = true;
        ApiRequest::FetchList {
            generation: self.generation,
            module: self.module,
            statut: self.status_filter.map(str::to_string),
        }
    }

    fn refetch_stats(&mut self) -> ApiRequest {
        self.stats_generation += 1;
        self.loading = true;
        ApiRequest::FetchStats {
            generation: self.stats_generation,
            module: self.module,
            periode: self.periode,
        }
    }

    /// Indices into `rows` that survive the client-side search.
    pub fn visible(&self) -> Vec<usize> {
        let view = view_for(self.module);
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| aggregates::matches_search(row, view.search_fields, &self.search))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn selected_row(&self) -> Option<&Value> {
        let visible = self.visible();
        visible.get(self.selected).map(|index| &self.rows[*index])
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn notify(&mut self, text: impl Into<String>, error: bool) {
        self.notice = Some(Notice {
            text: text.into(),
            error,
            expires: Instant::now() + NOTICE_TTL,
        });
    }

    fn handle_unauthorized(&mut self) {
        self.rows.clear();
        self.counts.clear();
        self.selected = 0;
        self.modals.clear();
        self.notify(
            "Session expirée — relancez 'qhse auth login'",
            true,
        );
    }

    fn cycle_status_filter(&mut self) -> ApiRequest {
        let statuses = statuses_for(self.module);
        self.status_filter = match self.status_filter {
            None => statuses.first().copied(),
            Some(current) => {
                let position = statuses.iter().position(|s| *s == current);
                match position {
                    Some(index) if index + 1 < statuses.len() => Some(statuses[index + 1]),
                    _ => None,
                }
            }
        };
        self.selected = 0;
        self.refetch()
    }

    fn cycle_module(&mut self) -> ApiRequest {
        let position = Module::ALL
            .iter()
            .position(|m| *m == self.module)
            .unwrap_or(0);
        self.module = Module::ALL[(position + 1) % Module::ALL.len()];
        self.rows.clear();
        self.counts.clear();
        self.stats = None;
        self.selected = 0;
        self.search.clear();
        self.status_filter = None;
        match self.screen {
            Screen::List => self.refetch(),
            Screen::Stats => self.refetch_stats(),
        }
    }

    fn cycle_periode(&mut self) -> ApiRequest {
        let position = Periode::ALL
            .iter()
            .position(|p| *p == self.periode)
            .unwrap_or(0);
        self.periode = Periode::ALL[(position + 1) % Periode::ALL.len()];
        self.refetch_stats()
    }

    fn open_create(&mut self) {
        self.modals.push(Modal::Form(FormState::create(self.module)));
    }

    fn open_edit(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(id) = row.get("id").and_then(Value::as_str).map(str::to_string) else {
            self.notify("selected entry has no id", true);
            return;
        };
        let entity = row.clone();
        self.modals
            .push(Modal::Form(FormState::edit(self.module, id, &entity)));
    }

    fn open_detail(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        // Decode through the typed DTO so the read-only view shows the
        // wire schema's fields, never a payload whose types drifted.
        let canonical = qhse_types::Entity::decode(self.module, &row)
            .ok()
            .and_then(|entity| entity.canonical().ok());
        match canonical {
            Some(entity) => self.modals.push(Modal::Detail {
                module: self.module,
                entity,
            }),
            None => self.notify("Fiche illisible: la réponse du serveur est malformée", true),
        }
    }

    fn open_confirm(&mut self) {
        let view = view_for(self.module);
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(id) = row.get("id").and_then(Value::as_str).map(str::to_string) else {
            self.notify("selected entry has no id", true);
            return;
        };
        let label = crate::display::cell(row, view.reference_field);
        self.modals.push(Modal::Confirm(ConfirmState {
            module: self.module,
            id,
            label,
        }));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<ApiRequest> {
        let mut requests = Vec::new();

        if let Some(modal) = self.modals.last_mut() {
            let (request, pop) = match modal {
                Modal::Form(form) => match form.handle_key(key) {
                    FormAction::Close => (None, true),
                    FormAction::Submit(request) => (Some(request), false),
                    FormAction::None => (None, false),
                },
                Modal::Confirm(confirm) => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => (
                        Some(ApiRequest::Delete {
                            module: confirm.module,
                            id: confirm.id.clone(),
                        }),
                        true,
                    ),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => (None, true),
                    _ => (None, false),
                },
                Modal::Detail { .. } => match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => (None, true),
                    _ => (None, false),
                },
            };
            if pop {
                self.modals.pop();
            }
            requests.extend(request);
            return requests;
        }

        if self.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.search.clear();
                    self.search_active = false;
                }
                KeyCode::Enter => self.search_active = false,
                KeyCode::Backspace => {
                    self.search.pop();
                    self.selected = 0;
                }
                KeyCode::Char(c) => {
                    self.search.push(c);
                    self.selected = 0;
                }
                _ => {}
            }
            return requests;
        }

        match (self.screen, key.code) {
            (_, KeyCode::Char('q')) => self.should_quit = true,
            (_, KeyCode::Tab) => requests.push(self.cycle_module()),
            (_, KeyCode::Char('r')) => match self.screen {
                Screen::List => requests.push(self.refetch()),
                Screen::Stats => requests.push(self.refetch_stats()),
            },
            (Screen::List, KeyCode::Char('j')) | (Screen::List, KeyCode::Down) => {
                let len = self.visible().len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            (Screen::List, KeyCode::Char('k')) | (Screen::List, KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
            }
            (Screen::List, KeyCode::Char('/')) => self.search_active = true,
            (Screen::List, KeyCode::Char('f')) => requests.push(self.cycle_status_filter()),
            (Screen::List, KeyCode::Char('n')) => self.open_create(),
            (Screen::List, KeyCode::Char('e')) | (Screen::List, KeyCode::Enter) => {
                self.open_edit()
            }
            (Screen::List, KeyCode::Char('v')) => self.open_detail(),
            (Screen::List, KeyCode::Char('d')) => self.open_confirm(),
            (Screen::List, KeyCode::Char('s')) => {
                self.screen = Screen::Stats;
                requests.push(self.refetch_stats());
            }
            (Screen::Stats, KeyCode::Char('s')) | (Screen::Stats, KeyCode::Esc) => {
                self.screen = Screen::List;
            }
            (Screen::Stats, KeyCode::Char('p')) => requests.push(self.cycle_periode()),
            _ => {}
        }
        requests
    }

    pub fn handle_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::List {
                generation,
                module,
                result,
            } => {
                // A response from a superseded fetch (older generation or a
                // module we already navigated away from) is dropped whole.
                if generation != self.generation || module != self.module {
                    return;
                }
                self.loading = false;
                match result {
                    Ok(rows) => {
                        let view = view_for(self.module);
                        self.counts = aggregates::count_by(&rows, view.status_field);
                        self.rows = rows;
                        self.clamp_selection();
                    }
                    Err(failure) => self.fail(failure),
                }
            }
            ApiResponse::Stats {
                generation,
                module,
                result,
            } => {
                if generation != self.stats_generation || module != self.module {
                    return;
                }
                self.loading = false;
                match result {
                    Ok(stats) => self.stats = Some(stats),
                    Err(failure) => self.fail(failure),
                }
            }
            ApiResponse::Created { module, result } => match result {
                Ok(entity) => {
                    let reference = {
                        let view = view_for(module);
                        crate::display::cell(&entity, view.reference_field)
                    };
                    if module == self.module {
                        let view = view_for(self.module);
                        aggregates::increment_bucket(
                            &mut self.counts,
                            &entity,
                            view.status_field,
                        );
                        self.rows.insert(0, entity);
                    }
                    self.finish_submit(format!("✓ {} créé", reference));
                }
                Err(failure) => self.fail_submit(failure),
            },
            ApiResponse::Updated { module, id, result } => match result {
                Ok(entity) => {
                    if module == self.module {
                        if let Some(row) = self
                            .rows
                            .iter_mut()
                            .find(|row| row.get("id").and_then(Value::as_str) == Some(id.as_str()))
                        {
                            *row = entity;
                        }
                        let view = view_for(self.module);
                        self.counts = aggregates::count_by(&self.rows, view.status_field);
                    }
                    self.finish_submit("✓ enregistré".to_string());
                }
                Err(failure) => self.fail_submit(failure),
            },
            ApiResponse::Deleted { module, id, result } => match result {
                Ok(()) => {
                    if module == self.module {
                        let view = view_for(self.module);
                        if let Some(position) = self
                            .rows
                            .iter()
                            .position(|row| row.get("id").and_then(Value::as_str) == Some(id.as_str()))
                        {
                            let removed = self.rows.remove(position);
                            aggregates::decrement_bucket(
                                &mut self.counts,
                                &removed,
                                view.status_field,
                            );
                        }
                        self.clamp_selection();
                    }
                    self.notify("✓ supprimé", false);
                }
                Err(failure) => self.fail(failure),
            },
        }
    }

    /// Mark the top form submitted: banner now, auto-close shortly after.
    fn finish_submit(&mut self, message: String) {
        if let Some(Modal::Form(form)) = self.modals.last_mut() {
            form.submitting = false;
            form.errors.clear();
            form.success_close = Some(Instant::now() + SUCCESS_CLOSE);
        }
        self.notify(message, false);
    }

    /// A failed submit keeps the modal open with the server's field
    /// messages appended, so nothing the user typed is lost.
    fn fail_submit(&mut self, failure: ApiFailure) {
        if failure.unauthorized {
            self.handle_unauthorized();
            return;
        }
        if let Some(Modal::Form(form)) = self.modals.last_mut() {
            form.submitting = false;
            form.errors = failure.messages;
        } else {
            self.notify(failure.summary(), true);
        }
    }

    fn fail(&mut self, failure: ApiFailure) {
        if failure.unauthorized {
            self.handle_unauthorized();
        } else {
            self.notify(failure.summary(), true);
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now >= notice.expires {
                self.notice = None;
            }
        }
        let close = matches!(
            self.modals.last(),
            Some(Modal::Form(form)) if form.success_close.map(|at| now >= at).unwrap_or(false)
        );
        if close {
            self.modals.pop();
        }
    }
}
