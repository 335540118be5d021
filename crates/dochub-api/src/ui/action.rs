//! Actions a screen offers to the client.

use std::collections::BTreeMap;

use serde::Serialize;

use super::EXTENSION;

/// A button or menu entry that calls an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiAction {
    /// Identifier, unique within the screen.
    pub id: String,
    /// Displayed text.
    pub caption: String,
    /// Icon path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Extension of the called endpoint.
    pub extension: String,
    /// Called endpoint; empty for a plain close.
    pub action: String,
    /// Extra parameters sent with the call.
    pub params: BTreeMap<String, String>,
    /// Whether the current screen closes when the action runs.
    pub close: bool,
}

impl UiAction {
    /// An action calling `action` in the documents extension.
    pub fn new(id: &str, caption: &str, action: &str) -> Self {
        Self {
            id: id.into(),
            caption: caption.into(),
            icon: None,
            extension: EXTENSION.into(),
            action: action.into(),
            params: BTreeMap::new(),
            close: false,
        }
    }

    /// The standard close action.
    pub fn close_screen() -> Self {
        Self::new("close", "Close", "")
            .icon("images/close.png")
            .closing()
    }

    /// The standard cancel action.
    pub fn cancel() -> Self {
        Self::new("cancel", "Cancel", "")
            .icon("images/cancel.png")
            .closing()
    }

    /// Set the icon.
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Add a parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Close the current screen when run.
    pub fn closing(mut self) -> Self {
        self.close = true;
        self
    }
}
