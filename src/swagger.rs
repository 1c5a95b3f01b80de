use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{CardPaymentStatus, CardStatus, NotificationKind, PendingStatus, RenewalMethod};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::card::get_my_card,
        handlers::card::self_renew,
        handlers::card::check_usability,
        handlers::card::record_usage,
        handlers::customer::get_my_profile,
        handlers::recruitment::submit_recruit,
        handlers::recruitment::list_my_recruits,
        handlers::admin::list_pending,
        handlers::admin::approve_pending,
        handlers::admin::reject_pending,
        handlers::admin::mark_card_valid,
        handlers::admin::mark_card_invalid,
        handlers::admin::suspend_card,
        handlers::admin::reactivate_card,
        handlers::admin::record_payment,
        handlers::admin::billing_history,
        handlers::admin::create_customer,
        handlers::admin::delete_customer,
        handlers::admin::run_sweep,
    ),
    components(
        schemas(
            LoginRequest,
            LoginRole,
            RefreshRequest,
            AuthResponse,
            CardResponse,
            CardStatusResponse,
            CardUsabilityResponse,
            RenewalEntryResponse,
            RecordUsageRequest,
            MarkCardRequest,
            SuspendCardRequest,
            RecordPaymentRequest,
            SelfRenewRequest,
            PaymentResponse,
            BillingRecordResponse,
            SubmitRecruitRequest,
            RejectRecruitRequest,
            PendingCustomerResponse,
            ApprovalResponse,
            CreateCustomerRequest,
            CustomerResponse,
            SweepSummary,
            ApiError,
            PaginationParams,
            CardPaymentStatus,
            CardStatus,
            PendingStatus,
            RenewalMethod,
            NotificationKind,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and token refresh"),
        (name = "card", description = "Self-service card status and renewal"),
        (name = "customer", description = "Customer account profile"),
        (name = "pos", description = "Point-of-sale card validation"),
        (name = "recruitment", description = "Marketer recruitment submissions"),
        (name = "admin", description = "Administration: reviews, overrides, payments, sweep")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
