use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::pagination::Pager;
use crate::models::tabs::Tab;
use crate::models::{ExportFormat, LogFilter, LogPage, LogQuery, PanelState};
use crate::state::AppState;
use crate::templates_structs::{LogsTemplate, PageContext};

/// Query string of the logs panel. Numbers arrive as text so that an empty
/// `page=` from a form does not reject the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct LogsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub username: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub format: Option<String>,
}

impl LogsParams {
    fn filter(&self) -> LogFilter {
        LogFilter::new(
            self.search.as_deref(),
            self.username.as_deref(),
            self.question.as_deref(),
            self.answer.as_deref(),
        )
    }

    fn query(&self, default_limit: u32) -> LogQuery {
        let number = |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse::<u32>().ok());
        LogQuery::new(
            number(&self.page),
            Some(number(&self.limit).unwrap_or(default_limit)),
            self.filter(),
        )
    }
}

fn logs_href(query: &LogQuery) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(qs) => format!("/logs?{qs}"),
        Err(_) => "/logs".to_string(),
    }
}

fn export_href(filter: &LogFilter, format: ExportFormat) -> String {
    let query = crate::models::log_entry::ExportQuery { format: format.as_str(), filter };
    match serde_urlencoded::to_string(&query) {
        Ok(qs) => format!("/logs/export?{qs}"),
        Err(_) => format!("/logs/export?format={}", format.as_str()),
    }
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    params: web::Query<LogsParams>,
) -> Result<HttpResponse, AppError> {
    let mut query = params.query(state.config.logs_page_size);
    let mut panel: PanelState<LogPage> = PanelState::new();
    panel.load("logs", state.api.list_logs(&query)).await;

    // Past the end (e.g. after the filters narrowed the result): show the last page.
    let last = panel.data().pages;
    if panel.errors().is_empty() && last > 0 && query.page > last {
        log::debug!("Page {} is past the last page {last}, reloading", query.page);
        query = query.with_page(last);
        panel.load("logs", state.api.list_logs(&query)).await;
    }

    let (page, errors) = panel.into_parts();
    let pager = Pager::build(query.page, page.pages, |p| logs_href(&query.with_page(p)));
    let ctx = PageContext::build(&session, state.app_name(), Tab::Logs);

    let tmpl = LogsTemplate {
        ctx,
        export_csv_href: export_href(&query.filter, ExportFormat::Csv),
        export_json_href: export_href(&query.filter, ExportFormat::Json),
        page,
        limit: query.limit,
        filter: query.filter,
        pager,
        errors,
    };
    render(tmpl)
}

pub async fn export(
    state: web::Data<AppState>,
    params: web::Query<LogsParams>,
) -> Result<HttpResponse, AppError> {
    let format = ExportFormat::parse(params.format.as_deref());
    let file = state.api.export_logs(&params.filter(), format).await?;
    log::info!("Exported logs as {} ({} bytes)", file.filename, file.body.len());

    Ok(HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file.filename),
        ))
        .body(file.body))
}
