use crate::handlers::require_role;
use crate::models::*;
use crate::services::CustomerService;
use crate::utils::PrincipalRole;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/customers/me",
    tag = "customer",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's account profile", body = CustomerResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_profile(
    customer_service: web::Data<CustomerService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let customer_id = match require_role(&req, PrincipalRole::Customer) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match customer_service.get_profile(customer_id).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn customer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/customers").route("/me", web::get().to(get_my_profile)));
}
