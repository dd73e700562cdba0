use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::panel::mutation_error;
use crate::models::tabs::Tab;
use crate::models::{AnswerOverride, OverrideDraft, PanelState};
use crate::state::AppState;
use crate::templates_structs::{OverrideEditTemplate, OverridesTemplate, PageContext};
use crate::web::{csrf, flash, validate};

use super::{CsrfOnly, redirect};

const MAX_QUESTION_LEN: usize = 1000;
const MAX_ANSWER_LEN: usize = 4000;

/// Optional pre-fill for the create form (e.g. coming from a complaint).
#[derive(Deserialize)]
pub struct DraftParams {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Deserialize)]
pub struct OverrideForm {
    pub csrf_token: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl OverrideForm {
    fn validate(&self) -> Vec<String> {
        let mut errors: Vec<String> = vec![];
        errors.extend(validate::validate_required(&self.question, "Question", MAX_QUESTION_LEN));
        errors.extend(validate::validate_required(&self.answer, "Answer", MAX_ANSWER_LEN));
        errors
    }

    fn draft(&self) -> OverrideDraft {
        OverrideDraft::new(&self.question, &self.answer)
    }
}

/// Fetch the list and render it with `draft` in the create form.
async fn render_list(
    state: &AppState,
    session: &Session,
    draft: OverrideDraft,
    rejected: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let mut panel: PanelState<Vec<AnswerOverride>> = PanelState::new();
    panel.reject(rejected);
    panel.load("manual answers", state.api.list_overrides()).await;
    let (overrides, errors) = panel.into_parts();

    let ctx = PageContext::build(session, state.app_name(), Tab::Overrides);
    render(OverridesTemplate { ctx, overrides, draft, errors })
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    params: web::Query<DraftParams>,
) -> Result<HttpResponse, AppError> {
    let draft = OverrideDraft::new(
        params.question.as_deref().unwrap_or_default(),
        params.answer.as_deref().unwrap_or_default(),
    );
    render_list(&state, &session, draft, vec![]).await
}

pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<OverrideForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = form.validate();
    if !errors.is_empty() {
        return render_list(&state, &session, form.draft(), errors).await;
    }

    match state.api.create_override(form.question.trim(), form.answer.trim()).await {
        Ok(()) => {
            log::info!("Manual answer saved for '{}'", form.question.trim());
            flash::set_flash(&session, "Manual answer saved");
            Ok(redirect("/overrides"))
        }
        Err(e) => {
            let message = mutation_error("save the manual answer", &e);
            render_list(&state, &session, form.draft(), vec![message]).await
        }
    }
}

pub async fn edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let overrides = match state.api.list_overrides().await {
        Ok(list) => list,
        Err(e) => {
            flash::set_flash_error(&session, mutation_error("load the manual answer", &e));
            return Ok(redirect("/overrides"));
        }
    };
    let existing = overrides.into_iter().find(|o| o.id == id).ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, state.app_name(), Tab::Overrides);
    let tmpl = OverrideEditTemplate {
        ctx,
        id,
        draft: OverrideDraft::new(&existing.question, &existing.answer),
        errors: vec![],
    };
    render(tmpl)
}

pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<OverrideForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let mut errors = form.validate();
    if errors.is_empty() {
        match state.api.update_override(id, form.question.trim(), form.answer.trim()).await {
            Ok(()) => {
                log::info!("Manual answer #{id} updated");
                flash::set_flash(&session, "Manual answer updated");
                return Ok(redirect("/overrides"));
            }
            Err(e) => errors.push(mutation_error("update the manual answer", &e)),
        }
    }

    let ctx = PageContext::build(&session, state.app_name(), Tab::Overrides);
    render(OverrideEditTemplate { ctx, id, draft: form.draft(), errors })
}

pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    match state.api.delete_override(id).await {
        Ok(()) => {
            log::info!("Manual answer #{id} deleted");
            flash::set_flash(&session, "Manual answer deleted");
        }
        Err(e) => flash::set_flash_error(&session, mutation_error("delete the manual answer", &e)),
    }
    Ok(redirect("/overrides"))
}
