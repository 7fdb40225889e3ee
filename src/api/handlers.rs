//! HTTP request handlers for the roster engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::allocation::{reassign_guards, ReconcileOutcome, ShiftReconciler};
use crate::attendance::build_attendance_overview;
use crate::billing::{assemble_invoice, BillingPeriod};
use crate::error::RosterError;
use crate::models::{Guard, GuardStatus, RequestStatus, Site, TemporaryStaffingRequest, User};
use crate::temporary::copy_temporary_slots;

use super::request::{
    CopySlotsRequest, CreateGuardRequest, CreateSiteRequest, CreateTemporaryRequest,
    CreateUserRequest, InvoiceRequest, OverviewParams, ReassignRequest, ReconcileRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ConflictResponse, CopyResponse, CreateUserResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sites", post(create_site).get(list_sites))
        .route("/sites/:id", get(get_site))
        .route("/guards", post(create_guard).get(list_guards))
        .route("/sites/:id/shifts/reconcile", post(reconcile_shifts))
        .route("/shifts/reassign", post(reassign_shifts))
        .route("/attendance/overview", get(attendance_overview))
        .route("/sites/:id/invoices", post(create_invoice))
        .route("/sites/:id/temporary-slots/copy", post(copy_slots))
        .route(
            "/temporary-requests",
            post(create_temporary_request).get(list_temporary_requests),
        )
        .route("/admin/users", post(create_user))
        .with_state(state)
}

/// Loads a site row or produces the standard 404.
async fn load_site(state: &AppState, id: Uuid) -> Result<Site, ApiErrorResponse> {
    state
        .sites()
        .get(id)
        .await?
        .ok_or_else(|| RosterError::SiteNotFound { id }.into())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiErrorResponse> {
    if value.trim().is_empty() {
        return Err(RosterError::Validation {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Handler for POST /sites.
async fn create_site(
    State(state): State<AppState>,
    Json(request): Json<CreateSiteRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_non_empty("name", &request.name)?;
    require_non_empty("address", &request.address)?;

    let site = Site {
        id: Uuid::new_v4(),
        name: request.name,
        address: request.address,
        gst_regime: request.gst_regime,
        gst_rate: request
            .gst_rate
            .unwrap_or(state.company().default_gst_rate),
        requirements: request.requirements.into_iter().map(Into::into).collect(),
    };

    let created = state.sites().create(site).await?;
    info!(site_id = %created.id, name = %created.name, "Site created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /sites.
async fn list_sites(State(state): State<AppState>) -> Result<impl IntoResponse, ApiErrorResponse> {
    let sites = state.sites().list().await?;
    Ok(Json(sites))
}

/// Handler for GET /sites/:id.
async fn get_site(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let site = load_site(&state, id).await?;
    Ok(Json(site))
}

/// Handler for POST /guards.
async fn create_guard(
    State(state): State<AppState>,
    Json(request): Json<CreateGuardRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_non_empty("name", &request.name)?;
    require_non_empty("badge_number", &request.badge_number)?;

    let guard = Guard {
        id: Uuid::new_v4(),
        name: request.name,
        badge_number: request.badge_number,
        status: request.status.unwrap_or(GuardStatus::Active),
        monthly_pay: request.monthly_pay,
    };

    let created = state.guards().create(guard).await?;
    info!(guard_id = %created.id, badge = %created.badge_number, "Guard created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /guards.
async fn list_guards(State(state): State<AppState>) -> Result<impl IntoResponse, ApiErrorResponse> {
    let guards = state.guards().list().await?;
    Ok(Json(guards))
}

/// Handler for POST /sites/:id/shifts/reconcile.
///
/// Accepts the full desired guard set for one shift type and applies the
/// difference against the stored rows. Returns 409 with the conflicting
/// attendance rows when removals are blocked.
async fn reconcile_shifts(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, %site_id, "Processing reconciliation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    if let Err(err) = load_site(&state, site_id).await {
        return err.into_response();
    }

    // Every guard in the target set must exist before anything is written
    for guard_id in &request.guard_ids {
        match state.guards().get(*guard_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!(correlation_id = %correlation_id, %guard_id, "Unknown guard in target set");
                let api_error: ApiErrorResponse =
                    RosterError::GuardNotFound { id: *guard_id }.into();
                return api_error.into_response();
            }
            Err(err) => {
                let api_error: ApiErrorResponse = err.into();
                return api_error.into_response();
            }
        }
    }

    let reconciler = ShiftReconciler::new(state.shifts(), state.attendance());
    match reconciler
        .reconcile(
            site_id,
            request.shift_type,
            &request.guard_ids,
            request.date,
            request.confirm_removal,
        )
        .await
    {
        Ok(ReconcileOutcome::Applied(report)) => {
            info!(
                correlation_id = %correlation_id,
                added = report.added.len(),
                removed = report.removed.len(),
                attendance_deleted = report.attendance_deleted,
                "Reconciliation applied"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Ok(ReconcileOutcome::ConfirmationRequired { conflicts }) => {
            warn!(
                correlation_id = %correlation_id,
                conflicts = conflicts.len(),
                "Reconciliation blocked by attendance conflicts"
            );
            (StatusCode::CONFLICT, Json(ConflictResponse::new(conflicts))).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Reconciliation failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /shifts/reassign.
async fn reassign_shifts(
    State(state): State<AppState>,
    Json(request): Json<ReassignRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let (row_a, row_b) =
        reassign_guards(state.shifts(), request.shift_id_a, request.shift_id_b).await?;
    info!(shift_a = %row_a.id, shift_b = %row_b.id, "Guards reassigned");
    Ok(Json([row_a, row_b]))
}

/// Handler for GET /attendance/overview.
async fn attendance_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let overview = build_attendance_overview(
        params.date,
        state.sites(),
        state.shifts(),
        state.attendance(),
    )
    .await?;
    Ok(Json(overview))
}

/// Handler for POST /sites/:id/invoices.
///
/// Assembles and stores an invoice for the site's contracted staffing over
/// the given billing period.
async fn create_invoice(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Json(request): Json<InvoiceRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let site = load_site(&state, site_id).await?;

    let gst_rate = request.gst_rate.unwrap_or(site.gst_rate);
    let period = BillingPeriod {
        start: request.period_start,
        end: request.period_end,
    };

    // Sequence number continues from the stored invoice count
    let sequence = state.invoices().list().await?.len() + 1;
    let invoice_number = format!("{}-{:04}", state.company().invoice_prefix, sequence);

    let invoice = assemble_invoice(&site, period, gst_rate, invoice_number)?;
    let created = state.invoices().create(invoice).await?;

    info!(
        correlation_id = %correlation_id,
        invoice_number = %created.invoice_number,
        %site_id,
        subtotal = %created.subtotal,
        total = %created.total,
        "Invoice created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for POST /sites/:id/temporary-slots/copy.
async fn copy_slots(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Json(request): Json<CopySlotsRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    load_site(&state, site_id).await?;

    let copied = copy_temporary_slots(
        state.shifts(),
        site_id,
        request.source_date,
        request.target_date,
    )
    .await?;
    Ok(Json(CopyResponse { copied }))
}

/// Handler for POST /temporary-requests.
async fn create_temporary_request(
    State(state): State<AppState>,
    Json(request): Json<CreateTemporaryRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    require_non_empty("role", &request.role)?;
    if request.day_slots == 0 && request.night_slots == 0 {
        return Err(RosterError::Validation {
            field: "day_slots".to_string(),
            message: "at least one slot must be requested".to_string(),
        }
        .into());
    }
    load_site(&state, request.site_id).await?;

    let row = TemporaryStaffingRequest {
        id: Uuid::new_v4(),
        site_id: request.site_id,
        date: request.date,
        role: request.role,
        day_slots: request.day_slots,
        night_slots: request.night_slots,
        pay_rate: request.pay_rate,
        status: RequestStatus::Pending,
    };

    let created = state.temporary_requests().create(row).await?;
    info!(request_id = %created.id, site_id = %created.site_id, "Temporary staffing request created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /temporary-requests.
async fn list_temporary_requests(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let requests = state.temporary_requests().list().await?;
    Ok(Json(requests))
}

/// Handler for POST /admin/users.
///
/// Creates an authentication identity with email confirmation bypassed,
/// then stores the linked application user row.
async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    require_non_empty("name", &request.name)?;
    require_non_empty("password", &request.password)?;
    require_non_empty("role", &request.role)?;
    if !request.email.contains('@') {
        return Err(RosterError::Validation {
            field: "email".to_string(),
            message: "must be a valid email address".to_string(),
        }
        .into());
    }

    let auth_id = state
        .auth()
        .create_identity(&request.email, &request.password, false)
        .await?;

    let user = User {
        id: Uuid::new_v4(),
        auth_id,
        name: request.name,
        email: request.email,
        role: request.role,
    };
    let created = state.users().create(user).await?;

    info!(
        correlation_id = %correlation_id,
        user_id = %created.id,
        role = %created.role,
        "User provisioned"
    );
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            success: true,
            user: created,
        }),
    ))
}
