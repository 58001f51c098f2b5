use axum::http::StatusCode;

use shiftstock_inventory::ProcessingError;

use crate::app::page::Notice;

/// Notice shown after every report (with or without an alert) went out.
pub const SUCCESS_MESSAGE: &str = "Report sent (and alerts if any)!";

pub fn status_for(err: &ProcessingError) -> StatusCode {
    match err {
        ProcessingError::MissingField(_) | ProcessingError::InvalidQuantity(..) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ProcessingError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn error_notice(err: &ProcessingError) -> Notice {
    Notice::error(format!("Error: {err}"))
}
