//! Typed screen components.

use std::collections::BTreeMap;

use serde::Serialize;

use super::action::UiAction;

/// One entry of a select or checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    /// Submitted value.
    pub id: String,
    /// Displayed text.
    pub caption: String,
}

impl Case {
    /// Build a case.
    pub fn new(id: impl ToString, caption: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            caption: caption.into(),
        }
    }
}

/// A grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Field name, used as key in every record.
    pub name: String,
    /// Column title.
    pub caption: String,
}

/// A grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Row identifier, submitted when an action targets the row.
    pub id: String,
    /// Cell values by header name.
    pub values: BTreeMap<String, String>,
}

/// What a component is, and its kind-specific fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentKind {
    /// A picture.
    Image { value: String },
    /// Read-only text.
    Label { value: String },
    /// Single-line text input.
    Edit { value: String },
    /// Multi-line text input.
    Memo { value: String },
    /// Drop-down list.
    Select { value: String, cases: Vec<Case> },
    /// List of checkable entries. `action` fires on selection change.
    Checklist {
        value: Vec<String>,
        cases: Vec<Case>,
        multi: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<UiAction>,
    },
    /// File picker.
    Upload { maxsize: u64 },
    /// Table with per-row actions.
    Grid {
        headers: Vec<Header>,
        records: Vec<Record>,
        actions: Vec<UiAction>,
    },
    /// Push button.
    Button { action: UiAction },
}

/// A positioned component.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    /// Component name; for inputs, the submitted parameter name.
    pub name: String,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Columns spanned.
    pub colspan: u32,
    /// Rows spanned.
    pub rowspan: u32,
    /// Kind and kind-specific fields.
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl Component {
    /// A 1x1 component at the origin; place it with [`Component::at`].
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            x: 0,
            y: 0,
            colspan: 1,
            rowspan: 1,
            kind,
        }
    }

    /// Place the component.
    pub fn at(mut self, x: u32, y: u32, colspan: u32, rowspan: u32) -> Self {
        self.x = x;
        self.y = y;
        self.colspan = colspan;
        self.rowspan = rowspan;
        self
    }

    pub fn image(name: &str, value: &str) -> Self {
        Self::new(name, ComponentKind::Image { value: value.into() })
    }

    pub fn label(name: &str, value: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::Label { value: value.into() })
    }

    pub fn edit(name: &str, value: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::Edit { value: value.into() })
    }

    pub fn memo(name: &str, value: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::Memo { value: value.into() })
    }

    pub fn select(name: &str, value: impl ToString, cases: Vec<Case>) -> Self {
        Self::new(
            name,
            ComponentKind::Select {
                value: value.to_string(),
                cases,
            },
        )
    }

    pub fn checklist(name: &str, value: Vec<String>, cases: Vec<Case>, multi: bool) -> Self {
        Self::new(
            name,
            ComponentKind::Checklist {
                value,
                cases,
                multi,
                action: None,
            },
        )
    }

    pub fn upload(name: &str, maxsize: u64) -> Self {
        Self::new(name, ComponentKind::Upload { maxsize })
    }

    pub fn button(name: &str, action: UiAction) -> Self {
        Self::new(name, ComponentKind::Button { action })
    }

    /// Attach a change action to a checklist. Other kinds are unchanged.
    pub fn on_change(mut self, change: UiAction) -> Self {
        if let ComponentKind::Checklist { action, .. } = &mut self.kind {
            *action = Some(change);
        }
        self
    }
}

/// Incremental grid builder.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    headers: Vec<Header>,
    records: Vec<Record>,
    actions: Vec<UiAction>,
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn header(mut self, name: &str, caption: &str) -> Self {
        self.headers.push(Header {
            name: name.into(),
            caption: caption.into(),
        });
        self
    }

    /// Append a row; `values` are `(header name, value)` pairs.
    pub fn record<I, K, V>(&mut self, id: impl ToString, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.records.push(Record {
            id: id.to_string(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
    }

    /// Append a row action.
    pub fn action(mut self, action: UiAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turn the grid into a named component.
    pub fn into_component(self, name: &str) -> Component {
        Component::new(
            name,
            ComponentKind::Grid {
                headers: self.headers,
                records: self.records,
                actions: self.actions,
            },
        )
    }
}
