use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::errors::{AppError, render};
use crate::models::tabs::Tab;
use crate::models::{PanelState, StatsSnapshot, StatsView};
use crate::state::AppState;
use crate::templates_structs::{PageContext, StatsTemplate};

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut panel: PanelState<Option<StatsSnapshot>> = PanelState::new();
    panel
        .load("statistics", async { state.api.stats().await.map(Some) })
        .await;
    let (snapshot, errors) = panel.into_parts();

    let ctx = PageContext::build(&session, state.app_name(), Tab::Stats);
    render(StatsTemplate { ctx, stats: snapshot.map(StatsView::from), errors })
}
