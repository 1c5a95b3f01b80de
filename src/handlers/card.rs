use crate::handlers::require_role;
use crate::models::*;
use crate::services::{CardService, PaymentService};
use crate::utils::PrincipalRole;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/cards/me",
    tag = "card",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Card status with recent renewal history", body = CardStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No card for this account")
    )
)]
pub async fn get_my_card(
    card_service: web::Data<CardService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let customer_id = match require_role(&req, PrincipalRole::Customer) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match card_service.get_card_status(customer_id).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cards/me/renew",
    tag = "card",
    request_body = SelfRenewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Card renewed", body = PaymentResponse),
        (status = 400, description = "Payment not due yet or below minimum"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn self_renew(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    request: web::Json<SelfRenewRequest>,
) -> Result<HttpResponse> {
    let customer_id = match require_role(&req, PrincipalRole::Customer) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match payment_service
        .self_renew(customer_id, request.into_inner())
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pos/cards/{card_number}/usability",
    tag = "pos",
    params(
        ("card_number" = String, Path, description = "Eight-digit card number")
    ),
    responses(
        (status = 200, description = "Usability verdict", body = CardUsabilityResponse),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn check_usability(
    card_service: web::Data<CardService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match card_service.check_usability(&path.into_inner()).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/pos/cards/{card_number}/usage",
    tag = "pos",
    params(
        ("card_number" = String, Path, description = "Eight-digit card number")
    ),
    request_body = RecordUsageRequest,
    responses(
        (status = 200, description = "Usage counted", body = CardResponse),
        (status = 400, description = "Card is not usable"),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn record_usage(
    card_service: web::Data<CardService>,
    path: web::Path<String>,
    request: web::Json<RecordUsageRequest>,
) -> Result<HttpResponse> {
    match card_service
        .record_usage(&path.into_inner(), request.into_inner().amount_saved_cents)
        .await
    {
        Ok(card) => Ok(HttpResponse::Ok()
            .json(json!({"success": true, "data": CardResponse::from(card)}))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn card_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cards")
            .route("/me", web::get().to(get_my_card))
            .route("/me/renew", web::post().to(self_renew)),
    );
}

pub fn pos_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pos")
            .route("/cards/{card_number}/usability", web::get().to(check_usability))
            .route("/cards/{card_number}/usage", web::post().to(record_usage)),
    );
}
