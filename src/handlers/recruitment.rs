use crate::handlers::require_role;
use crate::models::*;
use crate::services::RecruitmentService;
use crate::utils::PrincipalRole;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/recruits",
    tag = "recruitment",
    request_body = SubmitRecruitRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Submission created", body = PendingCustomerResponse),
        (status = 400, description = "Invalid months_purchased or phone"),
        (status = 409, description = "Duplicate phone number")
    )
)]
pub async fn submit_recruit(
    recruitment_service: web::Data<RecruitmentService>,
    req: HttpRequest,
    request: web::Json<SubmitRecruitRequest>,
) -> Result<HttpResponse> {
    let marketer_id = match require_role(&req, PrincipalRole::Marketer) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match recruitment_service
        .submit(marketer_id, request.into_inner())
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/recruits",
    tag = "recruitment",
    params(
        ("status" = Option<String>, Query, description = "Filter: pending / approved / rejected"),
        ("page" = Option<u64>, Query, description = "Page, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Rows per page, max 100")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The marketer's own submissions"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_my_recruits(
    recruitment_service: web::Data<RecruitmentService>,
    req: HttpRequest,
    query: web::Query<PendingListQuery>,
) -> Result<HttpResponse> {
    let marketer_id = match require_role(&req, PrincipalRole::Marketer) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    let q = query.into_inner();
    match recruitment_service
        .list_by_marketer(marketer_id, q.status, q.page.unwrap_or(1), q.page_size.unwrap_or(20))
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(json!({"success": true, "data": resp}))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn recruitment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recruits")
            .route("", web::post().to(submit_recruit))
            .route("", web::get().to(list_my_recruits)),
    );
}
