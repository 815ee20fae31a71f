//! API Handlers

use axum::async_trait;
use axum::extract::{FromRequest, Request, State};
use axum::Json;
use expense_assistant::{overall_status, BillDocument, BillVerdict, OverallStatus};
use expense_compliance::{render_report, ViolationSet};
use expense_core::ExpenseRecord;
use expense_features::{derive_date_features, FeatureRow};
use expense_inference::Predictions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============ Extractors ============

/// JSON body whose rejection is reported as a 422 `{"error": ...}`
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::InvalidPayload(rejection.body_text())),
        }
    }
}

// ============ Request / Response Types ============

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub policy_fingerprint: String,
    pub models: Vec<String>,
    pub bill_validation: bool,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub predictions: Predictions,
    pub compliance_flags: ViolationSet,
    pub compliance_report: String,
    pub features: FeatureRow,
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub expense_data: ExpenseRecord,
    pub bill_data: BillDocument,
}

#[derive(Serialize)]
pub struct FraudDetection {
    pub predictions: Predictions,
    pub compliance_flags: ViolationSet,
    pub is_suspicious: bool,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub bill_validation: BillVerdict,
    pub fraud_detection: FraudDetection,
    pub overall_status: OverallStatus,
}

// ============ Handlers ============

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        policy_fingerprint: state.policy_fingerprint.to_string(),
        models: state.models.names().map(str::to_string).collect(),
        bill_validation: state.bill_validator.is_some(),
    })
}

/// Score one expense with every model and the policy rules
pub async fn predict(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<ExpenseRecord>,
) -> ApiResult<Json<PredictResponse>> {
    let features = derive_date_features(&record)?;
    let predictions = state.models.predict_all(&features);
    let compliance_flags = state.engine.evaluate(&record);
    let compliance_report =
        render_report(&record, &compliance_flags, &state.engine.config().currency);

    info!(
        expense_id = ?record.expense_id,
        suspicious = predictions.is_suspicious(),
        violations = compliance_flags.len(),
        "Expense scored"
    );

    Ok(Json(PredictResponse {
        predictions,
        compliance_flags,
        compliance_report,
        features,
    }))
}

/// Validate the bill with the assistant and score the expense
pub async fn validate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ValidateRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    let validator = state
        .bill_validator
        .clone()
        .ok_or(ApiError::AssistantUnavailable)?;

    let request_id = Uuid::new_v4();
    let span = info_span!(
        "validate",
        %request_id,
        expense_id = ?request.expense_data.expense_id,
        invoice = %request.bill_data.invoice_number,
    );

    async move {
        let features = derive_date_features(&request.expense_data)?;
        let predictions = state.models.predict_all(&features);
        let compliance_flags = state.engine.evaluate(&request.expense_data);
        let is_suspicious = predictions.is_suspicious();

        let bill_validation = validator.validate_bill(&request.bill_data).await?;
        let status = overall_status(bill_validation.bill_valid(), is_suspicious);

        info!(
            validator = validator.name(),
            bill_valid = bill_validation.bill_valid(),
            is_suspicious,
            %status,
            "Expense validated"
        );

        Ok(Json(ValidateResponse {
            bill_validation,
            fraud_detection: FraudDetection {
                predictions,
                compliance_flags,
                is_suspicious,
            },
            overall_status: status,
        }))
    }
    .instrument(span)
    .await
}
