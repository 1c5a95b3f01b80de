use crate::handlers::require_role;
use crate::models::*;
use crate::services::{
    CardService, CustomerService, PaymentService, RecruitmentService, SweepService,
};
use crate::utils::PrincipalRole;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

macro_rules! require_admin {
    ($req:expr) => {
        match require_role($req, PrincipalRole::Admin) {
            Ok(id) => id,
            Err(e) => return Ok(e.error_response()),
        }
    };
}

#[utoipa::path(
    get,
    path = "/admin/pending-customers",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "Filter: pending / approved / rejected"),
        ("page" = Option<u64>, Query, description = "Page, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Rows per page, max 100")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recruitment submissions"),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn list_pending(
    recruitment_service: web::Data<RecruitmentService>,
    req: HttpRequest,
    query: web::Query<PendingListQuery>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    let q = query.into_inner();
    match recruitment_service
        .list_pending(q.status, q.page.unwrap_or(1), q.page_size.unwrap_or(20))
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/pending-customers/{id}/approve",
    tag = "admin",
    params(("id" = i64, Path, description = "Pending customer id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Approved: customer, card and commission created", body = ApprovalResponse),
        (status = 404, description = "Unknown submission"),
        (status = 409, description = "Already reviewed")
    )
)]
pub async fn approve_pending(
    recruitment_service: web::Data<RecruitmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let reviewer_id = require_admin!(&req);
    match recruitment_service
        .approve(path.into_inner(), reviewer_id)
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/pending-customers/{id}/reject",
    tag = "admin",
    params(("id" = i64, Path, description = "Pending customer id")),
    request_body = RejectRecruitRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rejected", body = PendingCustomerResponse),
        (status = 409, description = "Already reviewed")
    )
)]
pub async fn reject_pending(
    recruitment_service: web::Data<RecruitmentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<RejectRecruitRequest>,
) -> Result<HttpResponse> {
    let reviewer_id = require_admin!(&req);
    match recruitment_service
        .reject(path.into_inner(), reviewer_id, request.into_inner().reason)
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cards/{id}/mark-valid",
    tag = "admin",
    params(("id" = i64, Path, description = "Card id")),
    request_body = MarkCardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Card marked valid", body = CardResponse),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn mark_card_valid(
    card_service: web::Data<CardService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<MarkCardRequest>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match card_service
        .mark_valid(path.into_inner(), request.into_inner().notes)
        .await
    {
        Ok(card) => Ok(HttpResponse::Ok()
            .json(json!({"success": true, "data": CardResponse::from(card)}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cards/{id}/mark-invalid",
    tag = "admin",
    params(("id" = i64, Path, description = "Card id")),
    request_body = MarkCardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Card marked invalid and suspended", body = CardResponse),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn mark_card_invalid(
    card_service: web::Data<CardService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<MarkCardRequest>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match card_service
        .mark_invalid(path.into_inner(), request.into_inner().notes)
        .await
    {
        Ok(card) => Ok(HttpResponse::Ok()
            .json(json!({"success": true, "data": CardResponse::from(card)}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cards/{id}/suspend",
    tag = "admin",
    params(("id" = i64, Path, description = "Card id")),
    request_body = SuspendCardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Card suspended", body = CardResponse),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn suspend_card(
    card_service: web::Data<CardService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<SuspendCardRequest>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match card_service
        .suspend(path.into_inner(), request.into_inner().reason)
        .await
    {
        Ok(card) => Ok(HttpResponse::Ok()
            .json(json!({"success": true, "data": CardResponse::from(card)}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cards/{id}/reactivate",
    tag = "admin",
    params(("id" = i64, Path, description = "Card id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Suspension lifted; payment status untouched", body = CardResponse),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn reactivate_card(
    card_service: web::Data<CardService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match card_service.reactivate(path.into_inner()).await {
        Ok(card) => Ok(HttpResponse::Ok()
            .json(json!({"success": true, "data": CardResponse::from(card)}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/cards/{id}/payments",
    tag = "admin",
    params(("id" = i64, Path, description = "Card id")),
    request_body = RecordPaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment recorded and card renewed", body = PaymentResponse),
        (status = 400, description = "Below minimum payment (still recorded for audit)"),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn record_payment(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse> {
    let admin_id = require_admin!(&req);
    match payment_service
        .record_manual_payment(path.into_inner(), request.into_inner(), admin_id)
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/cards/{id}/billing-history",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Card id"),
        ("page" = Option<u64>, Query, description = "Page, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Rows per page, max 100")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Billing records for the card")
    )
)]
pub async fn billing_history(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    let q = query.into_inner();
    match payment_service
        .billing_history(path.into_inner(), q.page.unwrap_or(1), q.page_size.unwrap_or(20))
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/customers",
    tag = "admin",
    request_body = CreateCustomerRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customer and card created", body = CustomerResponse),
        (status = 409, description = "Duplicate phone number")
    )
)]
pub async fn create_customer(
    customer_service: web::Data<CustomerService>,
    req: HttpRequest,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match customer_service.create_customer(request.into_inner()).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/customers/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Customer id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customer and owned records deleted"),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn delete_customer(
    customer_service: web::Data<CustomerService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match customer_service.delete_customer(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(json!({"success": true, "message": "Customer deleted"}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/sweep/run",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sweep executed", body = SweepSummary)
    )
)]
pub async fn run_sweep(
    sweep_service: web::Data<SweepService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    require_admin!(&req);
    match sweep_service.run_sweep().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": summary}))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/pending-customers", web::get().to(list_pending))
            .route("/pending-customers/{id}/approve", web::post().to(approve_pending))
            .route("/pending-customers/{id}/reject", web::post().to(reject_pending))
            .route("/cards/{id}/mark-valid", web::post().to(mark_card_valid))
            .route("/cards/{id}/mark-invalid", web::post().to(mark_card_invalid))
            .route("/cards/{id}/suspend", web::post().to(suspend_card))
            .route("/cards/{id}/reactivate", web::post().to(reactivate_card))
            .route("/cards/{id}/payments", web::post().to(record_payment))
            .route("/cards/{id}/billing-history", web::get().to(billing_history))
            .route("/customers", web::post().to(create_customer))
            .route("/customers/{id}", web::delete().to(delete_customer))
            .route("/sweep/run", web::post().to(run_sweep)),
    );
}
