use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::ApiError;
use crate::errors::{AppError, render};
use crate::models::panel::mutation_error;
use crate::models::tabs::Tab;
use crate::models::{Complaint, OverrideDraft, PanelState};
use crate::state::AppState;
use crate::templates_structs::{ComplaintRespondTemplate, ComplaintRow, ComplaintsTemplate, PageContext};
use crate::web::{csrf, flash, validate};

use super::redirect;

const MAX_RESPONSE_LEN: usize = 4000;

#[derive(Deserialize)]
pub struct RespondForm {
    pub csrf_token: String,
    #[serde(default)]
    pub manual_response: String,
}

/// Link to the manual-answer form, pre-filled from the complaint.
fn override_href(complaint: &Complaint) -> String {
    let draft = OverrideDraft::new(&complaint.question, &complaint.answer);
    let pairs = [("question", draft.question.as_str()), ("answer", draft.answer.as_str())];
    match serde_urlencoded::to_string(pairs) {
        Ok(qs) => format!("/overrides?{qs}"),
        Err(_) => "/overrides".to_string(),
    }
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut panel: PanelState<Vec<Complaint>> = PanelState::new();
    panel.load("complaints", state.api.list_complaints()).await;
    let (complaints, errors) = panel.into_parts();

    let rows = complaints
        .into_iter()
        .map(|complaint| ComplaintRow { override_href: override_href(&complaint), complaint })
        .collect();

    let ctx = PageContext::build(&session, state.app_name(), Tab::Complaints);
    render(ComplaintsTemplate { ctx, rows, errors })
}

/// Load a complaint that can still be answered, or explain why not.
async fn respondable(state: &AppState, session: &Session, id: i64) -> Result<Option<Complaint>, AppError> {
    match state.api.get_complaint(id).await {
        Ok(complaint) if complaint.can_respond() => Ok(Some(complaint)),
        Ok(complaint) => {
            flash::set_flash_error(
                session,
                format!("Complaint #{id} is already {}", complaint.status.label().to_lowercase()),
            );
            Ok(None)
        }
        Err(ApiError::Status { status: 404, .. }) => Err(AppError::NotFound),
        Err(e) => {
            flash::set_flash_error(session, mutation_error(&format!("load complaint #{id}"), &e));
            Ok(None)
        }
    }
}

pub async fn respond_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let Some(complaint) = respondable(&state, &session, id).await? else {
        return Ok(redirect("/complaints"));
    };

    let ctx = PageContext::build(&session, state.app_name(), Tab::Complaints);
    let tmpl = ComplaintRespondTemplate {
        ctx,
        manual_response: complaint.answer.clone(),
        complaint,
        errors: vec![],
    };
    render(tmpl)
}

pub async fn respond(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<RespondForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    // The form may predate a resolve made elsewhere.
    let Some(complaint) = respondable(&state, &session, id).await? else {
        return Ok(redirect("/complaints"));
    };

    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.manual_response, "Response", MAX_RESPONSE_LEN));

    if errors.is_empty() {
        match state.api.resolve_complaint(id, form.manual_response.trim()).await {
            Ok(()) => {
                log::info!("Complaint #{id} answered manually");
                flash::set_flash(&session, format!("Response sent for complaint #{id}"));
                return Ok(redirect("/complaints"));
            }
            Err(ApiError::Status { status: 404, .. }) => return Err(AppError::NotFound),
            Err(e) => errors.push(mutation_error("send the response", &e)),
        }
    }

    let ctx = PageContext::build(&session, state.app_name(), Tab::Complaints);
    let tmpl = ComplaintRespondTemplate {
        ctx,
        complaint,
        manual_response: form.manual_response.clone(),
        errors,
    };
    render(tmpl)
}
