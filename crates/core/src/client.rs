//! Model of the browser-side submit behaviour of the public form.
//!
//! `assets/lead-form.js` in `leadform-api` implements this state machine in
//! the browser; [`ClientForm`] expresses the same transitions so they can be
//! exercised without one.
//!
//! ```text
//! Idle --submit--> Submitting --response/transport error--> Idle
//! ```
//!
//! The submit control stays disabled while a request is in flight, so at
//! most one request is outstanding at a time.

use std::collections::BTreeMap;

use crate::form::SUBMIT_LABEL;
use crate::lead::{form_fields, SAVE_ACTION};

/// Submit button label while a request is in flight.
pub const WAIT_LABEL: &str = "Please wait!";

/// Message shown when the request fails below the HTTP layer.
pub const TRANSPORT_ERROR_MSG: &str = "Server error!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Idle,
    Submitting,
}

/// Styling of the response region after a request finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseRegion {
    pub visible: bool,
    pub kind: Option<ResponseKind>,
    pub text: String,
}

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The visitor submitted the form.
    Submit,
    /// The endpoint answered with `{status, msg}`.
    Responded { status: u8, msg: String },
    /// The request failed without a well-formed answer.
    TransportFailed,
}

/// Side effects the page must perform after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one background POST carrying these form-encoded pairs.
    SendRequest(Vec<(String, String)>),
    /// Scroll the viewport to the response region.
    ScrollToResponse,
}

/// The public form as seen by the client script.
#[derive(Debug, Clone)]
pub struct ClientForm {
    state: ClientState,
    submit: SubmitControl,
    response: ResponseRegion,
    fields: BTreeMap<&'static str, String>,
}

impl ClientForm {
    /// A freshly rendered form carrying `token`.
    pub fn new(token: &str) -> Self {
        let mut fields: BTreeMap<&'static str, String> = form_fields::LEAD_INPUTS
            .iter()
            .map(|name| (*name, String::new()))
            .collect();
        fields.insert(form_fields::PUBLIC_NONCE, token.to_string());
        Self {
            state: ClientState::Idle,
            submit: SubmitControl {
                disabled: false,
                label: SUBMIT_LABEL.to_string(),
            },
            response: ResponseRegion::default(),
            fields,
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn response(&self) -> &ResponseRegion {
        &self.response
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Type into a form input. Unknown input names are ignored.
    pub fn set_field(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value.to_string();
        }
    }

    /// Apply `event`, returning the effects the page must carry out.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<Effect> {
        match (self.state, event) {
            (ClientState::Idle, ClientEvent::Submit) => {
                self.state = ClientState::Submitting;
                self.submit.disabled = true;
                self.submit.label = WAIT_LABEL.to_string();
                self.response = ResponseRegion::default();
                vec![Effect::SendRequest(self.request_body())]
            }
            (ClientState::Submitting, ClientEvent::Responded { status, msg }) => {
                self.finish();
                if status == 1 {
                    for name in form_fields::LEAD_INPUTS {
                        self.set_field(name, "");
                    }
                    self.show(ResponseKind::Success, msg);
                } else {
                    self.show(ResponseKind::Failure, msg);
                }
                vec![Effect::ScrollToResponse]
            }
            (ClientState::Submitting, ClientEvent::TransportFailed) => {
                self.finish();
                self.show(ResponseKind::Failure, TRANSPORT_ERROR_MSG.to_string());
                Vec::new()
            }
            // The disabled control swallows submits; stray responses are ignored.
            _ => Vec::new(),
        }
    }

    fn finish(&mut self) {
        self.state = ClientState::Idle;
        self.submit.disabled = false;
        self.submit.label = SUBMIT_LABEL.to_string();
    }

    fn show(&mut self, kind: ResponseKind, text: String) {
        self.response = ResponseRegion {
            visible: true,
            kind: Some(kind),
            text,
        };
    }

    fn request_body(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .chain(std::iter::once(("action".to_string(), SAVE_ACTION.to_string())))
            .collect()
    }
}
