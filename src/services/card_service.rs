use crate::config::BusinessConfig;
use crate::entities::{
    CardPaymentStatus, CardStatus, RenewalMethod, card_entity as cards,
    card_renewal_entity as renewals,
};
use crate::error::{AppError, AppResult};
use crate::models::{CardStatusResponse, CardUsabilityResponse, RenewalEntryResponse};
use crate::utils::{add_months_clamped, derive_card_number, sub_months_clamped};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// The card ledger: one membership card per customer, mutated only through the
/// operations below. Every write is a read-modify-write with a freshness filter
/// so concurrent renewals, sweeps, and overrides cannot clobber each other.
#[derive(Clone)]
pub struct CardService {
    pool: DatabaseConnection,
    business: BusinessConfig,
}

/// Upper bound on months a single payment may add, matching the recruitment
/// pipeline's months_purchased ceiling. Also keeps the month count safely
/// inside i32/u32 range for the date arithmetic.
pub(crate) const MAX_RENEWAL_MONTHS: i64 = 120;

pub(crate) fn months_for_amount(amount_cents: i64, month_price_cents: i64) -> i64 {
    // 1 unit of currency = 1 whole month, fractional remainders floored.
    amount_cents / month_price_cents.max(1)
}

pub(crate) fn compute_extension(
    now: DateTime<Utc>,
    current_valid_until: DateTime<Utc>,
    months: i32,
) -> (DateTime<Utc>, DateTime<Utc>) {
    // Extend from the current expiry while still valid, otherwise restart from
    // now; already-covered time is never charged twice.
    let anchor = current_valid_until.max(now);
    let new_valid_until = add_months_clamped(anchor, months as u32);
    let next_payment_due = sub_months_clamped(new_valid_until, 1);
    (new_valid_until, next_payment_due)
}

pub(crate) fn evaluate_usability(card: &cards::Model, now: DateTime<Utc>) -> CardUsabilityResponse {
    let days_remaining = (card.valid_until - now).num_days().max(0);

    let reason = if !card.is_enabled {
        Some("Card is disabled".to_string())
    } else if card.status != CardStatus::Active {
        Some(format!("Card is {}", card.status))
    } else if card.payment_status != CardPaymentStatus::Valid {
        Some("Payment not received".to_string())
    } else if card.valid_until <= now {
        Some("Card validity has expired".to_string())
    } else {
        None
    };

    CardUsabilityResponse {
        usable: reason.is_none(),
        reason,
        days_remaining,
    }
}

impl CardService {
    pub fn new(pool: DatabaseConnection, business: BusinessConfig) -> Self {
        Self { pool, business }
    }

    /// Create the one card a customer owns. Works inside the caller's
    /// transaction so recruitment approval stays atomic.
    pub async fn create_card<C: ConnectionTrait>(
        &self,
        db: &C,
        customer_id: i64,
        owner_token: &str,
    ) -> AppResult<cards::Model> {
        if cards::Entity::find()
            .filter(cards::Column::CustomerId.eq(customer_id))
            .one(db)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Customer already has a membership card".to_string(),
            ));
        }

        let card_number = derive_card_number(owner_token);
        if cards::Entity::find()
            .filter(cards::Column::CardNumber.eq(card_number.clone()))
            .one(db)
            .await?
            .is_some()
        {
            // Practically unreachable given the derivation, but surfaced, not ignored.
            return Err(AppError::Conflict(format!(
                "Card number {card_number} already in use"
            )));
        }

        let now = Utc::now();
        let valid_until = add_months_clamped(now, 1);

        let card = cards::ActiveModel {
            card_number: Set(card_number),
            customer_id: Set(customer_id),
            monthly_fee_cents: Set(self.business.month_price_cents),
            valid_until: Set(valid_until),
            next_payment_due: Set(valid_until),
            payment_status: Set(CardPaymentStatus::Valid),
            status: Set(CardStatus::Active),
            is_enabled: Set(true),
            suspension_reason: Set(None),
            total_savings_cents: Set(0),
            total_transactions: Set(0),
            last_used_at: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        renewals::ActiveModel {
            card_id: Set(card.id),
            amount_paid_cents: Set(0),
            months_added: Set(1),
            valid_until_after: Set(valid_until),
            method: Set(RenewalMethod::Initial),
            external_reference: Set(None),
            notes: Set(Some("Card created".to_string())),
            created_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(card)
    }

    /// Flexible renewal: N units of currency buy N whole months anchored on
    /// max(valid_until, now). Amounts below one unit add zero months but are
    /// still logged in the renewal history. The card update is conditional on
    /// the valid_until read at the start; a lost race is retried once.
    pub async fn renew_for_duration(
        &self,
        card_id: i64,
        amount_cents: i64,
        method: RenewalMethod,
        external_reference: Option<String>,
        notes: Option<String>,
    ) -> AppResult<(cards::Model, i32)> {
        if amount_cents < 0 {
            return Err(AppError::ValidationError(
                "Payment amount cannot be negative".to_string(),
            ));
        }

        let months = months_for_amount(amount_cents, self.business.month_price_cents);
        if months > MAX_RENEWAL_MONTHS {
            return Err(AppError::ValidationError(format!(
                "Amount adds {months} months, more than the maximum of {MAX_RENEWAL_MONTHS} per payment"
            )));
        }
        let months_added = months as i32;

        for _attempt in 0..2 {
            let card = cards::Entity::find_by_id(card_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;

            let now = Utc::now();

            let txn = self.pool.begin().await?;

            if months_added == 0 {
                // History-only entry: the under-threshold payment is recorded
                // without touching the card's state.
                renewals::ActiveModel {
                    card_id: Set(card.id),
                    amount_paid_cents: Set(amount_cents),
                    months_added: Set(0),
                    valid_until_after: Set(card.valid_until),
                    method: Set(method.clone()),
                    external_reference: Set(external_reference.clone()),
                    notes: Set(notes.clone()),
                    created_at: Set(Some(now)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                txn.commit().await?;
                return Ok((card, 0));
            }

            let (new_valid_until, next_payment_due) =
                compute_extension(now, card.valid_until, months_added);

            let update = cards::ActiveModel {
                valid_until: Set(new_valid_until),
                next_payment_due: Set(next_payment_due),
                payment_status: Set(CardPaymentStatus::Valid),
                status: Set(CardStatus::Active),
                suspension_reason: Set(None),
                is_enabled: Set(true),
                updated_at: Set(Some(now)),
                ..Default::default()
            };

            let res = cards::Entity::update_many()
                .set(update)
                .filter(cards::Column::Id.eq(card_id))
                .filter(cards::Column::ValidUntil.eq(card.valid_until))
                .exec(&txn)
                .await?;

            if res.rows_affected == 0 {
                // Someone renewed concurrently; re-read and retry once.
                txn.rollback().await?;
                continue;
            }

            renewals::ActiveModel {
                card_id: Set(card.id),
                amount_paid_cents: Set(amount_cents),
                months_added: Set(months_added),
                valid_until_after: Set(new_valid_until),
                method: Set(method.clone()),
                external_reference: Set(external_reference.clone()),
                notes: Set(notes.clone()),
                created_at: Set(Some(now)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            txn.commit().await?;

            let card = cards::Entity::find_by_id(card_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;
            return Ok((card, months_added));
        }

        Err(AppError::Conflict(
            "Card was renewed concurrently, please retry".to_string(),
        ))
    }

    /// Administrative override outside the payment flow: payment considered
    /// received, validity extended exactly one month from now.
    pub async fn mark_valid(&self, card_id: i64, notes: Option<String>) -> AppResult<cards::Model> {
        let card = self.get_card(card_id).await?;
        let now = Utc::now();
        let valid_until = add_months_clamped(now, 1);

        let update = cards::ActiveModel {
            payment_status: Set(CardPaymentStatus::Valid),
            status: Set(CardStatus::Active),
            is_enabled: Set(true),
            suspension_reason: Set(None),
            valid_until: Set(valid_until),
            next_payment_due: Set(valid_until),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let txn = self.pool.begin().await?;
        let res = cards::Entity::update_many()
            .set(update)
            .filter(cards::Column::Id.eq(card.id))
            .filter(cards::Column::ValidUntil.eq(card.valid_until))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict(
                "Card was modified concurrently, please retry".to_string(),
            ));
        }

        renewals::ActiveModel {
            card_id: Set(card.id),
            amount_paid_cents: Set(0),
            months_added: Set(1),
            valid_until_after: Set(valid_until),
            method: Set(RenewalMethod::ManualOverride),
            external_reference: Set(None),
            notes: Set(Some(
                notes.unwrap_or_else(|| "Marked valid by administrator".to_string()),
            )),
            created_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        self.get_card(card_id).await
    }

    /// Administrative override: payment considered missing, card suspended.
    pub async fn mark_invalid(
        &self,
        card_id: i64,
        notes: Option<String>,
    ) -> AppResult<cards::Model> {
        let card = self.get_card(card_id).await?;
        let now = Utc::now();
        let reason = notes.unwrap_or_else(|| "Payment not received".to_string());

        let update = cards::ActiveModel {
            payment_status: Set(CardPaymentStatus::Invalid),
            status: Set(CardStatus::Suspended),
            is_enabled: Set(false),
            suspension_reason: Set(Some(reason.clone())),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let txn = self.pool.begin().await?;
        let res = cards::Entity::update_many()
            .set(update)
            .filter(cards::Column::Id.eq(card.id))
            .filter(cards::Column::ValidUntil.eq(card.valid_until))
            .filter(cards::Column::Status.eq(card.status.clone()))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict(
                "Card was modified concurrently, please retry".to_string(),
            ));
        }

        renewals::ActiveModel {
            card_id: Set(card.id),
            amount_paid_cents: Set(0),
            months_added: Set(0),
            valid_until_after: Set(card.valid_until),
            method: Set(RenewalMethod::ManualOverride),
            external_reference: Set(None),
            notes: Set(Some(reason)),
            created_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        self.get_card(card_id).await
    }

    /// Disciplinary suspension, independent of payment status.
    pub async fn suspend(&self, card_id: i64, reason: String) -> AppResult<cards::Model> {
        let card = self.get_card(card_id).await?;

        let update = cards::ActiveModel {
            status: Set(CardStatus::Suspended),
            is_enabled: Set(false),
            suspension_reason: Set(Some(reason)),
            updated_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        let res = cards::Entity::update_many()
            .set(update)
            .filter(cards::Column::Id.eq(card.id))
            .filter(cards::Column::Status.eq(card.status.clone()))
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::Conflict(
                "Card was modified concurrently, please retry".to_string(),
            ));
        }

        self.get_card(card_id).await
    }

    /// Lift a suspension. Payment status is left untouched: a reactivated card
    /// with an invalid payment is still not usable under the compound invariant.
    pub async fn reactivate(&self, card_id: i64) -> AppResult<cards::Model> {
        let card = self.get_card(card_id).await?;

        let update = cards::ActiveModel {
            status: Set(CardStatus::Active),
            is_enabled: Set(true),
            suspension_reason: Set(None),
            updated_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        let res = cards::Entity::update_many()
            .set(update)
            .filter(cards::Column::Id.eq(card.id))
            .filter(cards::Column::Status.eq(card.status.clone()))
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::Conflict(
                "Card was modified concurrently, please retry".to_string(),
            ));
        }

        self.get_card(card_id).await
    }

    /// Called by the transaction path after a discount purchase.
    pub async fn add_savings(&self, card_id: i64, amount_cents: i64) -> AppResult<()> {
        let res = cards::Entity::update_many()
            .col_expr(
                cards::Column::TotalSavingsCents,
                Expr::col(cards::Column::TotalSavingsCents).add(amount_cents),
            )
            .col_expr(
                cards::Column::TotalTransactions,
                Expr::col(cards::Column::TotalTransactions).add(1),
            )
            .col_expr(cards::Column::LastUsedAt, Expr::value(Some(Utc::now())))
            .filter(cards::Column::Id.eq(card_id))
            .exec(&self.pool)
            .await?;

        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Card not found".to_string()));
        }
        Ok(())
    }

    /// POS usage report: refuses unusable cards, then bumps the counters.
    pub async fn record_usage(
        &self,
        card_number: &str,
        amount_saved_cents: i64,
    ) -> AppResult<cards::Model> {
        if amount_saved_cents < 0 {
            return Err(AppError::ValidationError(
                "Saved amount cannot be negative".to_string(),
            ));
        }

        let card = cards::Entity::find()
            .filter(cards::Column::CardNumber.eq(card_number))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;

        let verdict = evaluate_usability(&card, Utc::now());
        if !verdict.usable {
            return Err(AppError::ValidationError(
                verdict
                    .reason
                    .unwrap_or_else(|| "Card is not usable".to_string()),
            ));
        }

        self.add_savings(card.id, amount_saved_cents).await?;
        self.get_card(card.id).await
    }

    /// POS validation surface.
    pub async fn check_usability(&self, card_number: &str) -> AppResult<CardUsabilityResponse> {
        let card = cards::Entity::find()
            .filter(cards::Column::CardNumber.eq(card_number))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;

        Ok(evaluate_usability(&card, Utc::now()))
    }

    pub async fn get_card(&self, card_id: i64) -> AppResult<cards::Model> {
        cards::Entity::find_by_id(card_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Card not found".to_string()))
    }

    pub async fn get_card_for_customer(&self, customer_id: i64) -> AppResult<cards::Model> {
        cards::Entity::find()
            .filter(cards::Column::CustomerId.eq(customer_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("No card found for this account".to_string()))
    }

    /// Card plus recent renewal history for the self-service status endpoint.
    pub async fn get_card_status(&self, customer_id: i64) -> AppResult<CardStatusResponse> {
        let card = self.get_card_for_customer(customer_id).await?;

        let history = renewals::Entity::find()
            .filter(renewals::Column::CardId.eq(card.id))
            .order_by_desc(renewals::Column::Id)
            .limit(20)
            .all(&self.pool)
            .await?;

        Ok(CardStatusResponse {
            card: card.into(),
            renewal_history: history.into_iter().map(RenewalEntryResponse::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn card(
        valid_until: DateTime<Utc>,
        payment_status: CardPaymentStatus,
        status: CardStatus,
        is_enabled: bool,
    ) -> cards::Model {
        cards::Model {
            id: 1,
            card_number: "00001234".to_string(),
            customer_id: 1,
            monthly_fee_cents: 100,
            valid_until,
            next_payment_due: valid_until,
            payment_status,
            status,
            is_enabled,
            suspension_reason: None,
            total_savings_cents: 0,
            total_transactions: 0,
            last_used_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_months_for_amount_floors() {
        assert_eq!(months_for_amount(600, 100), 6);
        assert_eq!(months_for_amount(150, 100), 1);
        assert_eq!(months_for_amount(50, 100), 0);
        assert_eq!(months_for_amount(0, 100), 0);
    }

    #[test]
    fn test_oversized_amount_does_not_wrap() {
        // An absurd operator-entered amount must not wrap negative in i32 nor
        // silently skip the extension; it exceeds the per-payment ceiling and
        // gets rejected upstream before any date arithmetic.
        let months = months_for_amount(300_000_000_000, 100);
        assert_eq!(months, 3_000_000_000);
        assert!(months > MAX_RENEWAL_MONTHS);
    }

    #[test]
    fn test_extension_at_maximum_months() {
        let now = utc(2024, 6, 1);
        let (new_valid, next_due) =
            compute_extension(now, now, MAX_RENEWAL_MONTHS as i32);
        assert_eq!(new_valid, utc(2034, 6, 1));
        assert_eq!(next_due, utc(2034, 5, 1));
    }

    #[test]
    fn test_extension_anchors_on_future_expiry() {
        // Card still valid for 10 days: a 6-unit payment extends from the old
        // expiry, not from now.
        let now = utc(2024, 6, 1);
        let valid_until = utc(2024, 6, 11);
        let (new_valid, next_due) = compute_extension(now, valid_until, 6);
        assert_eq!(new_valid, utc(2024, 12, 11));
        assert_eq!(next_due, utc(2024, 11, 11));
    }

    #[test]
    fn test_extension_restarts_from_now_when_expired() {
        let now = utc(2024, 6, 15);
        let valid_until = utc(2024, 5, 1);
        let (new_valid, next_due) = compute_extension(now, valid_until, 2);
        assert_eq!(new_valid, utc(2024, 8, 15));
        assert_eq!(next_due, utc(2024, 7, 15));
    }

    #[test]
    fn test_extension_clamps_day_of_month() {
        let now = utc(2024, 1, 31);
        let (new_valid, _) = compute_extension(now, now, 1);
        assert_eq!(new_valid, utc(2024, 2, 29));
    }

    #[test]
    fn test_usability_requires_all_gates() {
        let now = utc(2024, 6, 1);
        let future = utc(2024, 6, 20);

        let ok = card(future, CardPaymentStatus::Valid, CardStatus::Active, true);
        let res = evaluate_usability(&ok, now);
        assert!(res.usable);
        assert_eq!(res.days_remaining, 19);

        let disabled = card(future, CardPaymentStatus::Valid, CardStatus::Active, false);
        assert!(!evaluate_usability(&disabled, now).usable);

        let suspended = card(future, CardPaymentStatus::Valid, CardStatus::Suspended, true);
        assert!(!evaluate_usability(&suspended, now).usable);

        let unpaid = card(future, CardPaymentStatus::Invalid, CardStatus::Active, true);
        assert!(!evaluate_usability(&unpaid, now).usable);

        let expired = card(utc(2024, 5, 1), CardPaymentStatus::Valid, CardStatus::Active, true);
        let res = evaluate_usability(&expired, now);
        assert!(!res.usable);
        assert_eq!(res.days_remaining, 0);
    }

    #[test]
    fn test_reactivated_card_with_invalid_payment_stays_unusable() {
        let now = utc(2024, 6, 1);
        // Reactivation restores status/is_enabled but never payment_status.
        let c = card(utc(2024, 6, 20), CardPaymentStatus::Invalid, CardStatus::Active, true);
        let res = evaluate_usability(&c, now);
        assert!(!res.usable);
        assert_eq!(res.reason.as_deref(), Some("Payment not received"));
    }
}
