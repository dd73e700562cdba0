use askama::Template;

use crate::models::UserRole;
use super::PageContext;

/// Submitted values of the role form, echoed back when validation fails.
#[derive(Debug, Clone, Default)]
pub struct RoleForm {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub ctx: PageContext,
    pub roles: Vec<UserRole>,
    pub form: RoleForm,
    pub errors: Vec<String>,
}
