use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::{Local, NaiveDateTime};

use shiftstock_inventory::{EMPLOYEE_FIELD, TIMESTAMP_FORMAT};

use crate::app::errors;
use crate::app::page::{self, Notice};
use crate::app::services::AppServices;

pub async fn show_form(Extension(services): Extension<Arc<AppServices>>) -> Response {
    render(&services, StatusCode::OK, None, now())
}

/// Process a submitted sheet and re-render the form with the outcome.
///
/// The processor blocks on SMTP, so it runs on the blocking pool.
pub async fn submit_report(
    Extension(services): Extension<Arc<AppServices>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let now = now();
    let employee = fields.get(EMPLOYEE_FIELD).cloned().unwrap_or_default();
    let processor = services.processor();

    let result = tokio::task::spawn_blocking(move || processor.process(&employee, &fields, now)).await;

    match result {
        Ok(Ok(outcome)) => {
            tracing::info!(
                alert_sent = outcome.alert_sent,
                low_stock = outcome.low_stock_count,
                "submission processed"
            );
            render(
                &services,
                StatusCode::OK,
                Some(Notice::success(errors::SUCCESS_MESSAGE)),
                now,
            )
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "submission rejected");
            render(&services, errors::status_for(&e), Some(errors::error_notice(&e)), now)
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "report processing task failed");
            render(
                &services,
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(Notice::error("Error: internal error while processing the report")),
                now,
            )
        }
    }
}

fn render(services: &AppServices, status: StatusCode, notice: Option<Notice>, now: NaiveDateTime) -> Response {
    let html = page::render_form(
        services.site_title(),
        services.catalog(),
        notice.as_ref(),
        &now.format(TIMESTAMP_FORMAT).to_string(),
    );
    (status, Html(html)).into_response()
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
