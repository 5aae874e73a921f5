use serde_json::{Map, Value};

/// Kind of control a field renders as. The renderer reports raw strings for
/// every kind; coercion happens in `apply_edit`, keyed off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    Time,
    Textarea,
    Select,
    Checkbox,
}

/// Declaration of one form field. `name` is an edit path and may address a
/// nested object with one dot (`stock.quantiteDisponible`).
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: &'static [&'static str],
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub rows: u16,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: &[],
            min: None,
            max: None,
            rows: 1,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn time(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Time)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Textarea).with_rows(3)
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Select);
        spec.options = options;
        spec
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }
}

/// Declaration of a repeatable group: an array of uniform sub-records
/// addressed as `<name>.<index>.<field>`.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub item_fields: Vec<FieldSpec>,
}

impl GroupSpec {
    pub fn new(name: &'static str, label: &'static str, item_fields: Vec<FieldSpec>) -> Self {
        Self {
            name,
            label,
            item_fields,
        }
    }
}

/// A cross-field rule runs against the whole draft after per-field checks
/// and reports at most one message.
pub type CrossRule = fn(&Map<String, Value>) -> Option<String>;

/// Hook that rewrites the outgoing payload just before submit, used for
/// derived fields (e.g. risk score from probability × severity).
pub type Finalize = fn(&mut Map<String, Value>);

/// Complete declaration of one entity form: ordered fields, repeatable
/// groups, cross-field rules, and submit-time derivation.
#[derive(Clone)]
pub struct FormSchema {
    pub entity: &'static str,
    /// `(field name, prefix)` for auto-generated reference numbers on create
    pub reference_field: Option<(&'static str, &'static str)>,
    pub fields: Vec<FieldSpec>,
    pub groups: Vec<GroupSpec>,
    pub rules: Vec<CrossRule>,
    pub finalize: Option<Finalize>,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Kind used to coerce an edit at `path`, resolving group item fields.
    pub fn kind_at(&self, path: &str) -> FieldKind {
        if let Some(spec) = self.field(path) {
            return spec.kind;
        }
        let mut parts = path.splitn(3, '.');
        if let (Some(group), Some(_idx), Some(field)) = (parts.next(), parts.next(), parts.next())
        {
            if let Some(group_spec) = self.group(group) {
                if let Some(spec) = group_spec.item_fields.iter().find(|f| f.name == field) {
                    return spec.kind;
                }
            }
        }
        FieldKind::Text
    }
}

impl std::fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSchema")
            .field("entity", &self.entity)
            .field("fields", &self.fields.len())
            .field("groups", &self.groups.len())
            .field("rules", &self.rules.len())
            .finish()
    }
}
