use crate::config::BusinessConfig;
use crate::entities::{
    PendingStatus, customer_entity as customers, marketer_entity as marketers,
    pending_customer_entity as pending,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ApprovalResponse, PaginatedResponse, PendingCustomerResponse, SubmitRecruitRequest,
};
use crate::services::CardService;
use crate::utils::{add_months_clamped, generate_temp_password, hash_password, normalize_phone};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

pub const MIN_MONTHS_PURCHASED: i32 = 1;
pub const MAX_MONTHS_PURCHASED: i32 = 120;

/// Two-phase recruitment pipeline: marketers submit recruits, administrators
/// approve or reject them. Approval is the only path that creates the customer
/// account, the card, and the marketer's commission, and it happens in a single
/// database transaction so a partial failure can never leave an orphan account
/// or an unearned commission behind.
#[derive(Clone)]
pub struct RecruitmentService {
    pool: DatabaseConnection,
    business: BusinessConfig,
    card_service: CardService,
}

pub(crate) fn validate_months_purchased(months: i32) -> AppResult<()> {
    if !(MIN_MONTHS_PURCHASED..=MAX_MONTHS_PURCHASED).contains(&months) {
        return Err(AppError::ValidationError(format!(
            "months_purchased must be between {MIN_MONTHS_PURCHASED} and {MAX_MONTHS_PURCHASED}"
        )));
    }
    Ok(())
}

impl RecruitmentService {
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

    pub async fn submit(
        &self,
        marketer_id: i64,
        req: SubmitRecruitRequest,
    ) -> AppResult<PendingCustomerResponse> {
        validate_months_purchased(req.months_purchased)?;
        if req.full_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "full_name is required".to_string(),
            ));
        }

        let phone = normalize_phone(&req.phone, &self.business.default_country_code)?;

        if customers::Entity::find()
            .filter(customers::Column::Phone.eq(phone.clone()))
            .one(&self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A customer with this phone number already exists".to_string(),
            ));
        }

        if pending::Entity::find()
            .filter(pending::Column::Phone.eq(phone.clone()))
            .filter(pending::Column::Status.eq(PendingStatus::Pending))
            .one(&self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A pending submission for this phone number already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let registration_date = req.registration_date.unwrap_or(now);
        // Same clamped month arithmetic as the card ledger: submitting on the
        // 31st for a 30-day target month yields the 30th.
        let valid_until_at_approval =
            add_months_clamped(registration_date, req.months_purchased as u32);

        let row = pending::ActiveModel {
            full_name: Set(req.full_name.trim().to_string()),
            phone: Set(phone),
            id_number: Set(req.id_number),
            location: Set(req.location),
            submitted_by: Set(marketer_id),
            registration_date: Set(registration_date),
            months_purchased: Set(req.months_purchased),
            valid_until_at_approval: Set(valid_until_at_approval),
            status: Set(PendingStatus::Pending),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Approve a submission. At most one review ever wins: the status flip is a
    /// conditional update keyed on `status = pending` inside the transaction,
    /// and every side effect (account, card, commission) rides the same
    /// transaction.
    pub async fn approve(&self, pending_id: i64, reviewer_id: i64) -> AppResult<ApprovalResponse> {
        let txn = self.pool.begin().await?;

        let submission = pending::Entity::find_by_id(pending_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending customer not found".to_string()))?;

        if submission.status != PendingStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Submission has already been {}",
                submission.status
            )));
        }

        let now = Utc::now();
        let flip = pending::ActiveModel {
            status: Set(PendingStatus::Approved),
            reviewed_by: Set(Some(reviewer_id)),
            reviewed_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };
        let res = pending::Entity::update_many()
            .set(flip)
            .filter(pending::Column::Id.eq(pending_id))
            .filter(pending::Column::Status.eq(PendingStatus::Pending))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::Conflict(
                "Submission has already been reviewed".to_string(),
            ));
        }

        // Account created with placeholder credentials; login stays disabled
        // until credentials are reset out-of-band.
        let password_hash = hash_password(&generate_temp_password())?;
        let customer = customers::ActiveModel {
            full_name: Set(submission.full_name.clone()),
            phone: Set(submission.phone.clone()),
            id_number: Set(submission.id_number.clone()),
            location: Set(submission.location.clone()),
            can_login: Set(false),
            password_hash: Set(Some(password_hash)),
            membership_months: Set(submission.months_purchased),
            membership_valid_until: Set(Some(submission.valid_until_at_approval)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // The card uses the ledger's own one-month default, independent of the
        // long-term membership field carried on the account.
        let owner_token = submission
            .id_number
            .clone()
            .unwrap_or_else(|| submission.phone.clone());
        let card = self
            .card_service
            .create_card(&txn, customer.id, &owner_token)
            .await?;

        let commission = self.business.commission_cents;
        let credited = marketers::Entity::update_many()
            .col_expr(
                marketers::Column::TotalEarningsCents,
                Expr::col(marketers::Column::TotalEarningsCents).add(commission),
            )
            .col_expr(
                marketers::Column::ApprovedCustomersCount,
                Expr::col(marketers::Column::ApprovedCustomersCount).add(1),
            )
            .filter(marketers::Column::Id.eq(submission.submitted_by))
            .exec(&txn)
            .await?;
        if credited.rows_affected == 0 {
            // The submitting marketer no longer exists; an approval must not
            // succeed with its commission silently dropped.
            txn.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Submitting marketer {} not found",
                submission.submitted_by
            )));
        }

        let stamp = pending::ActiveModel {
            resulting_customer_id: Set(Some(customer.id)),
            ..Default::default()
        };
        pending::Entity::update_many()
            .set(stamp)
            .filter(pending::Column::Id.eq(pending_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        let reviewed = pending::Entity::find_by_id(pending_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending customer not found".to_string()))?;

        log::info!(
            "Approved pending customer {pending_id}: customer {} card {} commission {commission} cents to marketer {}",
            customer.id,
            card.id,
            submission.submitted_by
        );

        Ok(ApprovalResponse {
            pending: reviewed.into(),
            customer_id: customer.id,
            card_id: card.id,
            commission_cents: commission,
        })
    }

    pub async fn reject(
        &self,
        pending_id: i64,
        reviewer_id: i64,
        reason: Option<String>,
    ) -> AppResult<PendingCustomerResponse> {
        let submission = pending::Entity::find_by_id(pending_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending customer not found".to_string()))?;

        if submission.status != PendingStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Submission has already been {}",
                submission.status
            )));
        }

        let now = Utc::now();
        let flip = pending::ActiveModel {
            status: Set(PendingStatus::Rejected),
            reviewed_by: Set(Some(reviewer_id)),
            reviewed_at: Set(Some(now)),
            rejection_reason: Set(Some(
                reason.unwrap_or_else(|| "Rejected by administrator".to_string()),
            )),
            updated_at: Set(Some(now)),
            ..Default::default()
        };
        let res = pending::Entity::update_many()
            .set(flip)
            .filter(pending::Column::Id.eq(pending_id))
            .filter(pending::Column::Status.eq(PendingStatus::Pending))
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::Conflict(
                "Submission has already been reviewed".to_string(),
            ));
        }

        let reviewed = pending::Entity::find_by_id(pending_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending customer not found".to_string()))?;
        Ok(reviewed.into())
    }

    pub async fn list_pending(
        &self,
        status: Option<PendingStatus>,
        page: u64,
        page_size: u64,
    ) -> AppResult<PaginatedResponse<PendingCustomerResponse>> {
        self.list(None, status, page, page_size).await
    }

    pub async fn list_by_marketer(
        &self,
        marketer_id: i64,
        status: Option<PendingStatus>,
        page: u64,
        page_size: u64,
    ) -> AppResult<PaginatedResponse<PendingCustomerResponse>> {
        self.list(Some(marketer_id), status, page, page_size).await
    }

    async fn list(
        &self,
        marketer_id: Option<i64>,
        status: Option<PendingStatus>,
        page: u64,
        page_size: u64,
    ) -> AppResult<PaginatedResponse<PendingCustomerResponse>> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);

        let mut query = pending::Entity::find();
        if let Some(mid) = marketer_id {
            query = query.filter(pending::Column::SubmittedBy.eq(mid));
        }
        if let Some(s) = status {
            query = query.filter(pending::Column::Status.eq(s));
        }

        let total = query.clone().count(&self.pool).await?;
        let rows = query
            .order_by_desc(pending::Column::Id)
            .offset((page - 1) * page_size)
            .limit(page_size)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(PendingCustomerResponse::from).collect(),
            page,
            page_size,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    #[test]
    fn test_months_purchased_bounds() {
        assert!(validate_months_purchased(1).is_ok());
        assert!(validate_months_purchased(120).is_ok());
        assert!(validate_months_purchased(0).is_err());
        assert!(validate_months_purchased(121).is_err());
        assert!(validate_months_purchased(-3).is_err());
    }

    #[test]
    fn test_valid_until_at_approval_clamps_to_month_end() {
        // Submitting 3 months on Jan 31 lands on Apr 30: April has 30 days.
        let registration: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap();
        let valid_until = add_months_clamped(registration, 3);
        assert_eq!(
            valid_until,
            Utc.with_ymd_and_hms(2024, 4, 30, 9, 0, 0).unwrap()
        );
    }
}
