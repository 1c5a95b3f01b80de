use crate::config::BusinessConfig;
use crate::entities::{RenewalMethod, billing_record_entity as billing};
use crate::error::{AppError, AppResult};
use crate::models::{
    BillingRecordResponse, PaginatedResponse, PaymentResponse, RecordPaymentRequest,
    SelfRenewRequest,
};
use crate::services::CardService;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// Thin payment recorder over the card ledger. Every recorded payment, even a
/// rejected below-minimum one, leaves a billing row for reporting.
#[derive(Clone)]
pub struct PaymentService {
    pool: DatabaseConnection,
    business: BusinessConfig,
    card_service: CardService,
}

impl PaymentService {
    pub fn new(
        pool: DatabaseConnection,
        business: BusinessConfig,
        card_service: CardService,
    ) -> Self {
        Self {
            pool,
            business,
            card_service,
        }
    }

    /// Operator-entered payment against any card.
    pub async fn record_manual_payment(
        &self,
        card_id: i64,
        req: RecordPaymentRequest,
        recorded_by: i64,
    ) -> AppResult<PaymentResponse> {
        let card = self.card_service.get_card(card_id).await?;

        if req.amount_cents < self.business.month_price_cents {
            // The attempt is still written for audit before it is rejected.
            self.append_billing_record(
                card.id,
                card.customer_id,
                req.amount_cents,
                0,
                req.method,
                req.external_reference,
                Some(recorded_by),
            )
            .await?;
            return Err(AppError::BelowMinimumPayment(format!(
                "Amount must cover at least one month ({} cents)",
                self.business.month_price_cents
            )));
        }

        let (card, months_applied) = self
            .card_service
            .renew_for_duration(
                card_id,
                req.amount_cents,
                req.method.clone(),
                req.external_reference.clone(),
                req.notes,
            )
            .await?;

        self.append_billing_record(
            card.id,
            card.customer_id,
            req.amount_cents,
            months_applied,
            req.method,
            req.external_reference,
            Some(recorded_by),
        )
        .await?;

        Ok(PaymentResponse {
            card: card.into(),
            months_applied,
            amount_cents: req.amount_cents,
        })
    }

    /// Self-service renewal, restricted to the caller's own card. Unlike the
    /// operator endpoint this rejects renewal while no payment is due yet.
    pub async fn self_renew(
        &self,
        customer_id: i64,
        req: SelfRenewRequest,
    ) -> AppResult<PaymentResponse> {
        let card = self.card_service.get_card_for_customer(customer_id).await?;

        let now = Utc::now();
        if card.next_payment_due > now {
            return Err(AppError::ValidationError(
                "Payment is not due yet".to_string(),
            ));
        }

        let method = req.method.unwrap_or(RenewalMethod::SelfService);
        let reference = format!("self-{}", Uuid::new_v4());

        if req.amount_cents < self.business.month_price_cents {
            self.append_billing_record(
                card.id,
                card.customer_id,
                req.amount_cents,
                0,
                method,
                Some(reference),
                None,
            )
            .await?;
            return Err(AppError::BelowMinimumPayment(format!(
                "Amount must cover at least one month ({} cents)",
                self.business.month_price_cents
            )));
        }

        let (card, months_applied) = self
            .card_service
            .renew_for_duration(
                card.id,
                req.amount_cents,
                method.clone(),
                Some(reference.clone()),
                None,
            )
            .await?;

        self.append_billing_record(
            card.id,
            card.customer_id,
            req.amount_cents,
            months_applied,
            method,
            Some(reference),
            None,
        )
        .await?;

        Ok(PaymentResponse {
            card: card.into(),
            months_applied,
            amount_cents: req.amount_cents,
        })
    }

    pub async fn billing_history(
        &self,
        card_id: i64,
        page: u64,
        page_size: u64,
    ) -> AppResult<PaginatedResponse<BillingRecordResponse>> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);

        let query = billing::Entity::find().filter(billing::Column::CardId.eq(card_id));
        let total = query.clone().count(&self.pool).await?;
        let rows = query
            .order_by_desc(billing::Column::Id)
            .offset((page - 1) * page_size)
            .limit(page_size)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(BillingRecordResponse::from).collect(),
            page,
            page_size,
            total,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    async fn append_billing_record(
        &self,
        card_id: i64,
        customer_id: i64,
        amount_cents: i64,
        months_applied: i32,
        method: RenewalMethod,
        external_reference: Option<String>,
        recorded_by: Option<i64>,
    ) -> AppResult<()> {
        billing::ActiveModel {
            card_id: Set(card_id),
            customer_id: Set(customer_id),
            amount_cents: Set(amount_cents),
            months_applied: Set(months_applied),
            method: Set(method),
            external_reference: Set(external_reference),
            recorded_by: Set(recorded_by),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(())
    }
}
