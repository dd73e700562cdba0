use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::panel::mutation_error;
use crate::models::synonym::group_by_keyword;
use crate::models::tabs::Tab;
use crate::models::{PanelState, Synonym};
use crate::state::AppState;
use crate::templates_structs::{PageContext, SynonymsTemplate};
use crate::web::{csrf, flash, validate};

use super::{CsrfOnly, redirect};

const MAX_WORD_LEN: usize = 200;

#[derive(Deserialize)]
pub struct SynonymForm {
    pub csrf_token: String,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub synonym: String,
}

async fn render_list(
    state: &AppState,
    session: &Session,
    form: Option<&SynonymForm>,
    rejected: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let mut panel: PanelState<Vec<Synonym>> = PanelState::new();
    panel.reject(rejected);
    panel.load("synonyms", state.api.list_synonyms()).await;
    let (synonyms, errors) = panel.into_parts();

    let ctx = PageContext::build(session, state.app_name(), Tab::Synonyms);
    let tmpl = SynonymsTemplate {
        ctx,
        groups: group_by_keyword(&synonyms),
        keyword: form.map(|f| f.keyword.clone()).unwrap_or_default(),
        synonym: form.map(|f| f.synonym.clone()).unwrap_or_default(),
        errors,
    };
    render(tmpl)
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
    form: web::Form<SynonymForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.keyword, "Keyword", MAX_WORD_LEN));
    errors.extend(validate::validate_required(&form.synonym, "Synonym", MAX_WORD_LEN));
    if !errors.is_empty() {
        return render_list(&state, &session, Some(&*form), errors).await;
    }

    match state.api.create_synonym(form.keyword.trim(), form.synonym.trim()).await {
        Ok(()) => {
            log::info!("Synonym '{}' added for '{}'", form.synonym.trim(), form.keyword.trim());
            flash::set_flash(&session, "Synonym added");
            Ok(redirect("/synonyms"))
        }
        Err(e) => {
            let message = mutation_error("add the synonym", &e);
            render_list(&state, &session, Some(&*form), vec![message]).await
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
    let id = path.into_inner();

    match state.api.delete_synonym(id).await {
        Ok(()) => {
            log::info!("Synonym #{id} deleted");
            flash::set_flash(&session, "Synonym deleted");
        }
        Err(e) => flash::set_flash_error(&session, mutation_error("delete the synonym", &e)),
    }
    Ok(redirect("/synonyms"))
}
