// handler/payment.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        notificationdb::{NewNotification, NotificationExt},
        paymentdb::{NewPayment, PaymentExt, Settlement},
        userdb::UserExt,
    },
    dtos::paymentdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::{
        notificationmodel::{NotificationPriority, NotificationType},
        paymentmodel::{Payment, PaymentMethod, PaymentStatus, PaymentType},
    },
    service::gateway::PaymentGateway,
    utils::currency::{format_paise_as_rupees, rupees_to_paise},
    AppState,
};

pub fn payment_handler() -> Router {
    Router::new()
        .route("/online/create-order", post(create_online_payment_order))
        .route("/online/complete", post(complete_online_payment))
        .route("/cash/create", post(create_local_cash_payment))
        .route("/employer", get(get_employer_payments))
        .route("/worker", get(get_worker_payments))
        .route("/:id", get(get_payment_by_id))
}

/// Notify the worker that money arrived. Runs after the settlement has
/// committed; a failure here only logs, it never unwinds the payment.
async fn notify_worker_of_payment(app_state: &AppState, payment: &Payment, cash: bool) {
    let (title, message) = if cash {
        (
            "Cash Payment Recorded",
            format!(
                "Cash payment of {} has been recorded for the job",
                format_paise_as_rupees(payment.amount)
            ),
        )
    } else {
        (
            "Payment Received",
            format!(
                "You have received {} for the job",
                format_paise_as_rupees(payment.amount)
            ),
        )
    };

    let result = app_state
        .db_client
        .create_notification(NewNotification {
            recipient_id: payment.worker_id,
            sender_id: Some(payment.employer_id),
            notif_type: NotificationType::PaymentReceived,
            title: title.to_string(),
            message,
            link: Some("/payments".to_string()),
            related_job_id: Some(payment.job_id),
            priority: NotificationPriority::High,
        })
        .await;

    if let Err(e) = result {
        tracing::error!(payment_id = %payment.id, "failed to create payment notification: {}", e);
    }
}

pub async fn create_online_payment_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateOrderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let worker = app_state
        .db_client
        .get_user(body.worker_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if worker.is_none() {
        return Err(HttpError::not_found("Worker not found"));
    }

    let amount = rupees_to_paise(body.amount);
    let order = app_state
        .gateway
        .create_order(amount)
        .await
        .map_err(HttpError::server_error)?;

    let payment = app_state
        .db_client
        .create_online_payment(
            NewPayment {
                worker_id: body.worker_id,
                employer_id: auth.user.id,
                job_id: body.job_id,
                application_id: body.application_id,
                amount,
                payment_type: body.payment_type.unwrap_or(PaymentType::Full),
                description: body.description,
            },
            order.order_id.clone(),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(payment_id = %payment.id, order_id = %order.order_id, "created pending online payment");

    Ok(Json(OrderResponseDto {
        success: true,
        message: "Order created successfully".to_string(),
        order_id: order.order_id,
        amount: body.amount,
        currency: order.currency,
        payment: payment.into(),
        mock_payment: true,
    }))
}

pub async fn complete_online_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CompletePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let payment = app_state
        .db_client
        .get_payment_by_order_id(&body.order_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment record not found"))?;

    // Completing the same order twice must be rejected, not re-applied.
    if !payment.status.can_transition(PaymentStatus::Success) {
        return Err(HttpError::bad_request(format!(
            "Payment is already {}",
            payment.status.to_str()
        )));
    }

    let confirmation = app_state
        .gateway
        .confirm(&body.order_id)
        .await
        .map_err(HttpError::server_error)?;

    let Settlement {
        payment,
        wage_record,
    } = app_state
        .db_client
        .settle_online_payment(
            payment.id,
            confirmation,
            body.payment_method.unwrap_or(PaymentMethod::Upi),
            body.wage_record_id,
            app_state.env.overpayment_policy,
        )
        .await?;

    notify_worker_of_payment(&app_state, &payment, false).await;

    Ok(Json(SettlementResponseDto {
        success: true,
        message: "Payment completed successfully".to_string(),
        payment: payment.into(),
        wage_record: wage_record.map(Into::into),
    }))
}

pub async fn create_local_cash_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateCashPaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let worker = app_state
        .db_client
        .get_user(body.worker_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if worker.is_none() {
        return Err(HttpError::not_found("Worker not found"));
    }

    let Settlement {
        payment,
        wage_record,
    } = app_state
        .db_client
        .create_cash_payment(
            NewPayment {
                worker_id: body.worker_id,
                employer_id: auth.user.id,
                job_id: body.job_id,
                application_id: body.application_id,
                amount: rupees_to_paise(body.amount),
                payment_type: body.payment_type.unwrap_or(PaymentType::Full),
                description: Some("Cash payment for job".to_string()),
            },
            body.cash_collected_by,
            body.notes,
            body.wage_record_id,
            app_state.env.overpayment_policy,
        )
        .await?;

    notify_worker_of_payment(&app_state, &payment, true).await;

    let response = Json(SettlementResponseDto {
        success: true,
        message: "Cash payment recorded successfully".to_string(),
        payment: payment.into(),
        wage_record: wage_record.map(Into::into),
    });

    Ok((StatusCode::CREATED, response))
}

pub async fn get_employer_payments(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let payments = app_state
        .db_client
        .get_employer_payments(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaymentListResponseDto {
        success: true,
        payments: payments.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_worker_payments(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let payments = app_state
        .db_client
        .get_worker_payments(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaymentListResponseDto {
        success: true,
        payments: payments.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_payment_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddleware>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    Ok(Json(PaymentResponseDto {
        success: true,
        payment: payment.into(),
    }))
}
