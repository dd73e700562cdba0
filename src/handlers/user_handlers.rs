use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::panel::mutation_error;
use crate::models::tabs::Tab;
use crate::models::{PanelState, UserRole};
use crate::state::AppState;
use crate::templates_structs::{PageContext, RoleForm, UsersTemplate};
use crate::web::{csrf, flash, validate};

use super::{CsrfOnly, redirect};

const MAX_NAME_LEN: usize = 100;
const MAX_ROLE_LEN: usize = 50;

#[derive(Deserialize)]
pub struct UserRoleForm {
    pub csrf_token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
}

impl UserRoleForm {
    fn echo(&self) -> RoleForm {
        RoleForm {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }

    /// Validated role, or the messages explaining what is missing.
    fn to_role(&self) -> Result<UserRole, Vec<String>> {
        let mut errors: Vec<String> = vec![];
        let user_id = match validate::parse_positive_id(&self.user_id, "User ID") {
            Ok(id) => Some(id),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        errors.extend(validate::validate_required(&self.username, "Username", MAX_NAME_LEN));
        errors.extend(validate::validate_required(&self.role, "Role", MAX_ROLE_LEN));

        match user_id {
            Some(user_id) if errors.is_empty() => Ok(UserRole {
                user_id,
                username: self.username.trim().to_string(),
                role: self.role.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

async fn render_list(
    state: &AppState,
    session: &Session,
    form: RoleForm,
    rejected: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let mut panel: PanelState<Vec<UserRole>> = PanelState::new();
    panel.reject(rejected);
    panel.load("users", state.api.list_roles()).await;
    let (roles, errors) = panel.into_parts();

    let ctx = PageContext::build(session, state.app_name(), Tab::Users);
    render(UsersTemplate { ctx, roles, form, errors })
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    render_list(&state, &session, RoleForm::default(), vec![]).await
}

/// Create a role, or update the existing one for the same user id.
pub async fn save(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<UserRoleForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let role = match form.to_role() {
        Ok(role) => role,
        Err(errors) => return render_list(&state, &session, form.echo(), errors).await,
    };

    match state.api.save_role(&role).await {
        Ok(()) => {
            log::info!("Role '{}' saved for user {}", role.role, role.user_id);
            flash::set_flash(&session, format!("Role saved for {}", role.username));
            Ok(redirect("/users"))
        }
        Err(e) => {
            let message = mutation_error("save the role", &e);
            render_list(&state, &session, form.echo(), vec![message]).await
        }
    }
}

pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user_id = path.into_inner();

    match state.api.delete_role(user_id).await {
        Ok(()) => {
            log::info!("Role of user {user_id} deleted");
            flash::set_flash(&session, "User removed");
        }
        Err(e) => flash::set_flash_error(&session, mutation_error("remove the user", &e)),
    }
    Ok(redirect("/users"))
}
