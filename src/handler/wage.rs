// handler/wage.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        userdb::{BankDetails, UserExt},
        wagedb::{self, NewWageRecord, WageRecordExt},
    },
    dtos::{
        userdtos::UserResponseDto,
        wagedtos::*,
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::{
        usermodel::UserRole,
        wagemodel::{WagePeriodType, WageType},
    },
    service::ledger,
    utils::currency::rupees_to_paise,
    AppState,
};

pub fn wage_handler() -> Router {
    Router::new()
        .route("/create", post(create_wage_record))
        .route("/worker", get(get_worker_wage_records))
        .route("/employer", get(get_employer_wage_records))
        .route("/summary", get(get_worker_wage_summary))
        .route("/summary/:worker_id", get(get_wage_summary_for_worker))
        .route("/update-payment", put(update_wage_payment))
        .route("/bank-details", put(update_bank_details))
        .route("/upi-details", put(update_upi_details))
        .route("/:id", get(get_wage_record_by_id))
}

pub async fn create_wage_record(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateWageRecordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.role != UserRole::Employer {
        return Err(HttpError::forbidden(
            "Only employers can create wage records",
        ));
    }

    let worker = app_state
        .db_client
        .get_user(body.worker_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Worker not found"))?;

    if worker.role != UserRole::Worker {
        return Err(HttpError::bad_request("Wage records can only target workers"));
    }

    let work_date = body
        .work_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let hours_worked = body.hours_worked.unwrap_or(0.0);
    let days_worked = body.days_worked.unwrap_or(1);
    let wage_type = body.wage_type.unwrap_or(WageType::Daily);
    let rate_per_day = rupees_to_paise(body.rate_per_day.unwrap_or(0.0));
    let rate_per_hour = rupees_to_paise(body.rate_per_hour.unwrap_or(0.0));

    let total_earned = ledger::total_earned(
        wage_type,
        rate_per_day,
        rate_per_hour,
        days_worked,
        hours_worked,
    );

    if total_earned <= 0 {
        return Err(HttpError::bad_request(
            "Wage record must have a positive earned amount",
        ));
    }

    let record = app_state
        .db_client
        .create_wage_record(NewWageRecord {
            worker_id: body.worker_id,
            employer_id: auth.user.id,
            job_id: body.job_id,
            work_date,
            hours_worked,
            days_worked,
            wage_type,
            rate_per_day,
            rate_per_hour,
            total_earned,
            period_type: body.period_type.unwrap_or(WagePeriodType::Daily),
            period_start: body.period_start.unwrap_or(work_date),
            period_end: body.period_end.unwrap_or(work_date),
            description: body.description,
            notes: body.notes,
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(wage_record_id = %record.id, worker_id = %record.worker_id, "created wage record");

    let response = Json(WageRecordResponseDto {
        success: true,
        message: "Wage record created successfully".to_string(),
        wage_record: record.into(),
    });

    Ok((StatusCode::CREATED, response))
}

pub async fn get_worker_wage_records(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let records = app_state
        .db_client
        .get_worker_wage_records(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let summary = wagedb::summarize(&records);

    Ok(Json(WageRecordListResponseDto {
        success: true,
        wage_records: records.into_iter().map(Into::into).collect(),
        summary: summary.into(),
    }))
}

pub async fn get_employer_wage_records(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let records = app_state
        .db_client
        .get_employer_wage_records(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let summary = wagedb::summarize(&records);

    Ok(Json(WageRecordListResponseDto {
        success: true,
        wage_records: records.into_iter().map(Into::into).collect(),
        summary: summary.into(),
    }))
}

pub async fn get_worker_wage_summary(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let summary = app_state
        .db_client
        .get_worker_wage_summary(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(WageSummaryResponseDto {
        success: true,
        summary: summary.into(),
    }))
}

/// Summary for a named worker, visible to the worker and any employer.
pub async fn get_wage_summary_for_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.id != worker_id && auth.user.role != UserRole::Employer {
        return Err(HttpError::forbidden(
            "Not authorized to view this wage summary",
        ));
    }

    let summary = app_state
        .db_client
        .get_worker_wage_summary(worker_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(WageSummaryResponseDto {
        success: true,
        summary: summary.into(),
    }))
}

pub async fn get_wage_record_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(wage_record_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let record = app_state
        .db_client
        .get_wage_record(wage_record_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Wage record not found"))?;

    if record.worker_id != auth.user.id && record.employer_id != auth.user.id {
        return Err(HttpError::forbidden("Not authorized to view this wage record"));
    }

    let payments = app_state
        .db_client
        .get_wage_record_payment_ids(record.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(WageRecordResponseDto {
        success: true,
        message: "Wage record retrieved successfully".to_string(),
        wage_record: WageRecordDto::from(record).with_payments(payments),
    }))
}

/// Manually apply an already-settled payment to a specific wage record.
pub async fn update_wage_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateWagePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.role != UserRole::Employer {
        return Err(HttpError::forbidden(
            "Only employers can apply payments to wage records",
        ));
    }

    let record = app_state
        .db_client
        .apply_payment_to_wage_record(
            body.wage_record_id,
            body.payment_id,
            rupees_to_paise(body.amount_paid),
            app_state.env.overpayment_policy,
        )
        .await?;

    Ok(Json(WageRecordResponseDto {
        success: true,
        message: "Wage record updated successfully".to_string(),
        wage_record: record.into(),
    }))
}

pub async fn update_bank_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateBankDetailsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .update_bank_details(
            auth.user.id,
            BankDetails {
                account_holder_name: body.account_holder_name,
                account_number: body.account_number,
                ifsc_code: body.ifsc_code,
                bank_name: body.bank_name,
                branch_name: body.branch_name,
            },
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        success: true,
        message: "Bank details updated successfully".to_string(),
        user: crate::dtos::userdtos::FilterUserDto::filter_user(&user),
    }))
}

pub async fn update_upi_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateUpiDetailsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .update_upi_details(auth.user.id, body.upi_id, body.upi_name)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        success: true,
        message: "UPI details updated successfully".to_string(),
        user: crate::dtos::userdtos::FilterUserDto::filter_user(&user),
    }))
}
