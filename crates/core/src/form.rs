//! HTML rendering of the public lead form and the admin edit form.

use std::fmt::Write as _;

use serde::Deserialize;

use crate::lead::{form_fields, Lead, BUDGET_OPTIONS};
use crate::sanitize::positive_integer;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub const DEFAULT_LABEL_NAME: &str = "Name (required)";
pub const DEFAULT_LABEL_PHONE: &str = "Phone Number";
pub const DEFAULT_LABEL_EMAIL: &str = "Email Address (required)";
pub const DEFAULT_LABEL_BUDGET: &str = "Desired Budget";
pub const DEFAULT_LABEL_MESSAGE: &str = "Message";
pub const DEFAULT_MAX_NAME: u32 = 70;
pub const DEFAULT_MAX_PHONE: u32 = 30;
pub const DEFAULT_MAX_EMAIL: u32 = 50;
pub const DEFAULT_ROWS_MESSAGE: u32 = 5;
pub const DEFAULT_COLS_MESSAGE: u32 = 50;

/// Label of the submit button when idle.
pub const SUBMIT_LABEL: &str = "Submit";

/// Rendering options for the public form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Label of the name input (default `"Name (required)"`).
    pub label_name: String,
    /// Label of the phone input (default `"Phone Number"`).
    pub label_phone: String,
    /// Label of the email input (default `"Email Address (required)"`).
    pub label_email: String,
    /// Label of the budget select (default `"Desired Budget"`).
    pub label_budget: String,
    /// Label of the message textarea (default `"Message"`).
    pub label_message: String,
    /// `maxlength` of the name input (default 70).
    pub max_name: u32,
    /// `maxlength` of the phone input (default 30).
    pub max_phone: u32,
    /// `maxlength` of the email input (default 50).
    pub max_email: u32,
    /// Rows of the message textarea (default 5).
    pub rows_message: u32,
    /// Columns of the message textarea (default 50).
    pub cols_message: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            label_name: DEFAULT_LABEL_NAME.into(),
            label_phone: DEFAULT_LABEL_PHONE.into(),
            label_email: DEFAULT_LABEL_EMAIL.into(),
            label_budget: DEFAULT_LABEL_BUDGET.into(),
            label_message: DEFAULT_LABEL_MESSAGE.into(),
            max_name: DEFAULT_MAX_NAME,
            max_phone: DEFAULT_MAX_PHONE,
            max_email: DEFAULT_MAX_EMAIL,
            rows_message: DEFAULT_ROWS_MESSAGE,
            cols_message: DEFAULT_COLS_MESSAGE,
        }
    }
}

/// Form options exactly as written by a page author, in query strings or
/// form placement directives. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormAttributes {
    #[serde(rename = "label-name")]
    pub label_name: Option<String>,
    #[serde(rename = "label-phone")]
    pub label_phone: Option<String>,
    #[serde(rename = "label-email")]
    pub label_email: Option<String>,
    #[serde(rename = "label-budget")]
    pub label_budget: Option<String>,
    #[serde(rename = "label-message")]
    pub label_message: Option<String>,
    #[serde(rename = "max-name")]
    pub max_name: Option<String>,
    #[serde(rename = "max-phone")]
    pub max_phone: Option<String>,
    #[serde(rename = "max-email")]
    pub max_email: Option<String>,
    #[serde(rename = "rows-message")]
    pub rows_message: Option<String>,
    #[serde(rename = "cols-message")]
    pub cols_message: Option<String>,
}

impl FormAttributes {
    /// Collect attributes from `key=value` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut attrs = Self::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match key {
                "label-name" => attrs.label_name = value,
                "label-phone" => attrs.label_phone = value,
                "label-email" => attrs.label_email = value,
                "label-budget" => attrs.label_budget = value,
                "label-message" => attrs.label_message = value,
                "max-name" => attrs.max_name = value,
                "max-phone" => attrs.max_phone = value,
                "max-email" => attrs.max_email = value,
                "rows-message" => attrs.rows_message = value,
                "cols-message" => attrs.cols_message = value,
                _ => {}
            }
        }
        attrs
    }
}

impl From<FormAttributes> for FormConfig {
    fn from(attrs: FormAttributes) -> Self {
        let limit = |raw: Option<String>, default: u32| {
            raw.map_or(default, |r| positive_integer(&r, default))
        };
        Self {
            label_name: attrs.label_name.unwrap_or_else(|| DEFAULT_LABEL_NAME.into()),
            label_phone: attrs.label_phone.unwrap_or_else(|| DEFAULT_LABEL_PHONE.into()),
            label_email: attrs.label_email.unwrap_or_else(|| DEFAULT_LABEL_EMAIL.into()),
            label_budget: attrs.label_budget.unwrap_or_else(|| DEFAULT_LABEL_BUDGET.into()),
            label_message: attrs
                .label_message
                .unwrap_or_else(|| DEFAULT_LABEL_MESSAGE.into()),
            max_name: limit(attrs.max_name, DEFAULT_MAX_NAME),
            max_phone: limit(attrs.max_phone, DEFAULT_MAX_PHONE),
            max_email: limit(attrs.max_email, DEFAULT_MAX_EMAIL),
            rows_message: limit(attrs.rows_message, DEFAULT_ROWS_MESSAGE),
            cols_message: limit(attrs.cols_message, DEFAULT_COLS_MESSAGE),
        }
    }
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn budget_options(selected: Option<&str>) -> String {
    let mut out = String::new();
    for (value, label) in BUDGET_OPTIONS {
        let marker = if !value.is_empty() && selected == Some(*value) {
            r#" selected="selected""#
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<option value="{}"{marker}>{}</option>"#,
            escape_html(value),
            escape_html(label)
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Public form
// ---------------------------------------------------------------------------

/// Render the public submission form carrying anti-forgery `token`.
pub fn render_public_form(config: &FormConfig, token: &str) -> String {
    format!(
        r#"<!-- leads-form start -->
<div class="wpl_container">
<form id="wpl_lead_form" action="" method="post">
<input type="hidden" name="{nonce_field}" id="{nonce_field}" value="{token}"/>
<div class="wpl_fieldset">
<label for="{name}" class="wpl_label">{label_name}</label>
<input type="text" name="{name}" id="{name}" class="wpl_text_input" required="required" maxlength="{max_name}"/>
</div>
<div class="wpl_fieldset">
<label for="{phone}" class="wpl_label">{label_phone}</label>
<input type="tel" name="{phone}" id="{phone}" class="wpl_text_input" maxlength="{max_phone}"/>
</div>
<div class="wpl_fieldset">
<label for="{email}" class="wpl_label">{label_email}</label>
<input type="email" name="{email}" id="{email}" class="wpl_text_input" required="required" maxlength="{max_email}"/>
</div>
<div class="wpl_fieldset">
<label for="{budget}" class="wpl_label">{label_budget}</label>
<select name="{budget}" id="{budget}" class="wpl_select">{options}</select>
</div>
<div class="wpl_fieldset">
<label for="{message}" class="wpl_label">{label_message}</label>
<textarea rows="{rows}" cols="{cols}" name="{message}" id="{message}" class="wpl_textarea"></textarea>
</div>
<div class="wpl_fieldset">
<button class="wpl_submit" id="wpl_submit" type="submit">{submit}</button>
</div>
<div class="wpl_alert" id="wpl_response" style="display: none;"><span></span></div>
</form>
</div>
<!-- leads-form end -->
"#,
        nonce_field = form_fields::PUBLIC_NONCE,
        token = escape_html(token),
        name = form_fields::NAME,
        phone = form_fields::PHONE,
        email = form_fields::EMAIL,
        budget = form_fields::BUDGET,
        message = form_fields::MESSAGE,
        label_name = escape_html(&config.label_name),
        label_phone = escape_html(&config.label_phone),
        label_email = escape_html(&config.label_email),
        label_budget = escape_html(&config.label_budget),
        label_message = escape_html(&config.label_message),
        max_name = config.max_name,
        max_phone = config.max_phone,
        max_email = config.max_email,
        rows = config.rows_message,
        cols = config.cols_message,
        options = budget_options(None),
        submit = SUBMIT_LABEL,
    )
}

// ---------------------------------------------------------------------------
// Edit form
// ---------------------------------------------------------------------------

/// Render the admin edit form for `lead`, carrying edit-scoped `token`.
///
/// The creation time is shown but disabled, so browsers never submit it.
pub fn render_edit_form(lead: &Lead, token: &str) -> String {
    let attr = |v: &Option<String>| escape_html(v.as_deref().unwrap_or_default());
    let creation_time = lead
        .creation_time
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();

    format!(
        r#"<!-- lead edit form start -->
<div class="wpl_container">
<h2>Customer Data</h2>
<form id="wpl_edit_form" action="/admin/leads/{id}" method="post">
<input type="hidden" name="{nonce_field}" id="{nonce_field}" value="{token}"/>
<div class="wpl_fieldset">
<label for="{name}" class="wpl_label">Customer name</label>
<input type="text" name="{name}" id="{name}" class="wpl_text_input" value="{name_value}"/>
</div>
<div class="wpl_fieldset">
<label for="{phone}" class="wpl_label">Phone Number</label>
<input type="tel" name="{phone}" id="{phone}" class="wpl_text_input" value="{phone_value}"/>
</div>
<div class="wpl_fieldset">
<label for="{email}" class="wpl_label">Email Address</label>
<input type="email" name="{email}" id="{email}" class="wpl_text_input" value="{email_value}"/>
</div>
<div class="wpl_fieldset">
<label for="{budget}" class="wpl_label">Desired Budget</label>
<select name="{budget}" id="{budget}" class="wpl_select">{options}</select>
</div>
<div class="wpl_fieldset">
<label for="{message}" class="wpl_label">Message</label>
<textarea rows="5" cols="10" name="{message}" id="{message}" class="wpl_textarea">{message_value}</textarea>
</div>
<div class="wpl_fieldset">
<label for="{creation}" class="wpl_label">Creation Time</label>
<input type="text" name="{creation}" id="{creation}" class="wpl_text_input" value="{creation_value}" disabled="disabled"/>
</div>
<div class="wpl_fieldset">
<button class="wpl_submit" type="submit">Update</button>
</div>
</form>
</div>
<!-- lead edit form end -->
"#,
        id = lead.id,
        nonce_field = form_fields::EDIT_NONCE,
        token = escape_html(token),
        name = form_fields::NAME,
        phone = form_fields::PHONE,
        email = form_fields::EMAIL,
        budget = form_fields::BUDGET,
        message = form_fields::MESSAGE,
        creation = form_fields::CREATION_TIME,
        name_value = escape_html(&lead.name),
        phone_value = attr(&lead.phone),
        email_value = attr(&lead.email),
        options = budget_options(lead.budget.as_deref()),
        message_value = attr(&lead.message),
        creation_value = escape_html(&creation_time),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
