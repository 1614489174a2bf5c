//! Well-known role name constants carried in admin access tokens.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Whether a role may open and save the lead edit form.
pub fn can_edit_leads(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
