//! Screen envelopes returned by the document endpoints.

use std::collections::BTreeMap;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::EXTENSION;
use super::action::UiAction;
use super::component::Component;

/// How the client should treat a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Observer {
    /// A screen to display.
    #[serde(rename = "core.custom")]
    Custom,
    /// The requested change was applied.
    #[serde(rename = "core.acknowledge")]
    Acknowledge,
    /// A question or message box.
    #[serde(rename = "core.dialogbox")]
    DialogBox,
    /// The request failed.
    #[serde(rename = "core.exception")]
    Exception,
}

/// A full screen description.
#[derive(Debug, Clone, Serialize)]
pub struct UiResponse {
    /// Response nature.
    pub observer: Observer,
    /// Extension of the answering endpoint.
    pub extension: String,
    /// Answering endpoint.
    pub action: String,
    /// Window title.
    pub title: String,
    /// Parameters echoed back so the client can resubmit them.
    pub context: BTreeMap<String, String>,
    /// Screen-level actions.
    pub actions: Vec<UiAction>,
    /// Screen components, in display order.
    pub components: Vec<Component>,
    /// Message text of a dialog box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UiResponse {
    fn with_observer(observer: Observer, action: &str, title: &str) -> Self {
        Self {
            observer,
            extension: EXTENSION.into(),
            action: action.into(),
            title: title.into(),
            context: BTreeMap::new(),
            actions: Vec::new(),
            components: Vec::new(),
            message: None,
        }
    }

    /// A screen to display.
    pub fn custom(action: &str, title: &str) -> Self {
        Self::with_observer(Observer::Custom, action, title)
    }

    /// Acknowledge a change, echoing the submitted parameters.
    pub fn acknowledge(action: &str, context: BTreeMap<String, String>) -> Self {
        let mut response = Self::with_observer(Observer::Acknowledge, action, "");
        response.context = context;
        response
    }

    /// A confirmation box.
    pub fn dialog(action: &str, title: &str, message: impl Into<String>) -> Self {
        let mut response = Self::with_observer(Observer::DialogBox, action, title);
        response.message = Some(message.into());
        response
    }

    /// Append a component.
    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Append a screen action.
    pub fn action(mut self, action: UiAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Set a context value.
    pub fn context(mut self, name: &str, value: impl ToString) -> Self {
        self.context.insert(name.into(), value.to_string());
        self
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }
}

impl IntoResponse for UiResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
