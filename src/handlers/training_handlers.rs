use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::errors::{AppError, render};
use crate::models::tabs::Tab;
use crate::models::{PanelState, PriorityDoc, Synonym, priority, synonym};
use crate::state::AppState;
use crate::templates_structs::{PageContext, TrainingTemplate};

/// Synonyms and priorities side by side; both lists are fetched concurrently.
pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut synonyms: PanelState<Vec<Synonym>> = PanelState::new();
    let mut priorities: PanelState<Vec<PriorityDoc>> = PanelState::new();

    let synonyms_ticket = synonyms.begin();
    let priorities_ticket = priorities.begin();
    let (synonyms_result, priorities_result) =
        tokio::join!(state.api.list_synonyms(), state.api.list_priorities());
    synonyms.finish(synonyms_ticket, synonyms_result, "synonyms");
    priorities.finish(priorities_ticket, priorities_result, "priorities");

    let (synonym_rows, mut errors) = synonyms.into_parts();
    let (priority_rows, priority_errors) = priorities.into_parts();
    errors.extend(priority_errors);

    let ctx = PageContext::build(&session, state.app_name(), Tab::Training);
    let tmpl = TrainingTemplate {
        ctx,
        synonyms: synonym::group_by_keyword(&synonym_rows)
            .iter()
            .map(|g| (g.key.clone(), synonym::joined(g)))
            .collect(),
        priorities: priority::group_by_keyword(&priority_rows),
        errors,
    };
    render(tmpl)
}
