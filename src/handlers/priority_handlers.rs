use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::panel::mutation_error;
use crate::models::tabs::Tab;
use crate::models::{PanelState, PriorityDoc};
use crate::state::AppState;
use crate::templates_structs::{PageContext, PrioritiesTemplate, PriorityEditTemplate};
use crate::web::{csrf, flash, validate};

use super::{CsrfOnly, redirect};

const MAX_KEYWORD_LEN: usize = 200;
const MAX_DOCUMENT_LEN: usize = 255;

#[derive(Deserialize)]
pub struct PriorityForm {
    pub csrf_token: String,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub document_name: String,
}

#[derive(Deserialize)]
pub struct DocumentForm {
    pub csrf_token: String,
    #[serde(default)]
    pub document_name: String,
}

async fn render_list(
    state: &AppState,
    session: &Session,
    form: Option<&PriorityForm>,
    rejected: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let mut panel: PanelState<Vec<PriorityDoc>> = PanelState::new();
    panel.reject(rejected);
    panel.load("priorities", state.api.list_priorities()).await;
    let (priorities, errors) = panel.into_parts();

    let ctx = PageContext::build(session, state.app_name(), Tab::Priorities);
    let tmpl = PrioritiesTemplate {
        ctx,
        priorities,
        keyword: form.map(|f| f.keyword.clone()).unwrap_or_default(),
        document_name: form.map(|f| f.document_name.clone()).unwrap_or_default(),
        errors,
    };
    render(tmpl)
}

/// The remote has no lookup by id, so find the row in the full list.
async fn find_priority(state: &AppState, session: &Session, id: i64) -> Result<Option<PriorityDoc>, AppError> {
    match state.api.list_priorities().await {
        Ok(list) => list
            .into_iter()
            .find(|p| p.id == id)
            .map(Some)
            .ok_or(AppError::NotFound),
        Err(e) => {
            flash::set_flash_error(session, mutation_error("load the priority", &e));
            Ok(None)
        }
    }
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    render_list(&state, &session, None, vec![]).await
}

pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<PriorityForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.keyword, "Keyword", MAX_KEYWORD_LEN));
    errors.extend(validate::validate_required(&form.document_name, "Document name", MAX_DOCUMENT_LEN));
    if !errors.is_empty() {
        return render_list(&state, &session, Some(&*form), errors).await;
    }

    match state.api.save_priority(form.keyword.trim(), form.document_name.trim()).await {
        Ok(()) => {
            log::info!("Priority document '{}' set for '{}'", form.document_name.trim(), form.keyword.trim());
            flash::set_flash(&session, "Priority saved");
            Ok(redirect("/priorities"))
        }
        Err(e) => {
            let message = mutation_error("save the priority", &e);
            render_list(&state, &session, Some(&*form), vec![message]).await
        }
    }
}

pub async fn edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let Some(priority) = find_priority(&state, &session, id).await? else {
        return Ok(redirect("/priorities"));
    };

    let ctx = PageContext::build(&session, state.app_name(), Tab::Priorities);
    let tmpl = PriorityEditTemplate {
        ctx,
        document_name: priority.document_name.clone(),
        priority,
        errors: vec![],
    };
    render(tmpl)
}

/// Only the document name changes; saving re-posts the keyword, which the
/// remote treats as an upsert.
pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<DocumentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let Some(priority) = find_priority(&state, &session, id).await? else {
        return Ok(redirect("/priorities"));
    };

    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.document_name, "Document name", MAX_DOCUMENT_LEN));
    if errors.is_empty() {
        match state.api.save_priority(&priority.keyword, form.document_name.trim()).await {
            Ok(()) => {
                log::info!("Priority #{id} now points at '{}'", form.document_name.trim());
                flash::set_flash(&session, "Priority updated");
                return Ok(redirect("/priorities"));
            }
            Err(e) => errors.push(mutation_error("update the priority", &e)),
        }
    }

    let ctx = PageContext::build(&session, state.app_name(), Tab::Priorities);
    let tmpl = PriorityEditTemplate {
        ctx,
        priority,
        document_name: form.document_name.clone(),
        errors,
    };
    render(tmpl)
}

pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    match state.api.delete_priority(id).await {
        Ok(()) => {
            log::info!("Priority #{id} deleted");
            flash::set_flash(&session, "Priority deleted");
        }
        Err(e) => flash::set_flash_error(&session, mutation_error("delete the priority", &e)),
    }
    Ok(redirect("/priorities"))
}
