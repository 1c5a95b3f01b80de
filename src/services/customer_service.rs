use crate::config::BusinessConfig;
use crate::entities::{
    billing_record_entity as billing, card_entity as cards, card_renewal_entity as renewals,
    customer_entity as customers, notification_entity as notifications,
};
use crate::error::{AppError, AppResult};
use crate::models::{CreateCustomerRequest, CustomerResponse};
use crate::services::CardService;
use crate::utils::{add_months_clamped, hash_password, normalize_phone, validate_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
    Set,
};

#[derive(Clone)]
pub struct CustomerService {
    pool: DatabaseConnection,
    business: BusinessConfig,
    card_service: CardService,
}

impl CustomerService {
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

    /// Direct administrator path: account and card are created together.
    pub async fn create_customer(&self, req: CreateCustomerRequest) -> AppResult<CustomerResponse> {
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

        let password_hash = match &req.password {
            Some(p) => {
                validate_password(p)?;
                Some(hash_password(p)?)
            }
            None => None,
        };

        let months = req.months_purchased.unwrap_or(1);
        if !(1..=120).contains(&months) {
            return Err(AppError::ValidationError(
                "months_purchased must be between 1 and 120".to_string(),
            ));
        }

        let now = Utc::now();
        let txn = self.pool.begin().await?;

        let customer = customers::ActiveModel {
            full_name: Set(req.full_name.trim().to_string()),
            phone: Set(phone.clone()),
            id_number: Set(req.id_number.clone()),
            location: Set(req.location),
            can_login: Set(password_hash.is_some()),
            password_hash: Set(password_hash),
            membership_months: Set(months),
            membership_valid_until: Set(Some(add_months_clamped(now, months as u32))),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let owner_token = req.id_number.unwrap_or(phone);
        self.card_service
            .create_card(&txn, customer.id, &owner_token)
            .await?;

        txn.commit().await?;
        Ok(customer.into())
    }

    pub async fn get_profile(&self, customer_id: i64) -> AppResult<CustomerResponse> {
        let customer = customers::Entity::find_by_id(customer_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
        Ok(customer.into())
    }

    /// Orchestrated cascade: one transaction deletes the customer's billing
    /// records, notifications, renewal history, card, and finally the account.
    /// Pending-customer audit rows are deliberately left in place.
    pub async fn delete_customer(&self, customer_id: i64) -> AppResult<()> {
        let customer = customers::Entity::find_by_id(customer_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let txn = self.pool.begin().await?;

        let card = cards::Entity::find()
            .filter(cards::Column::CustomerId.eq(customer.id))
            .one(&txn)
            .await?;

        if let Some(card) = &card {
            renewals::Entity::delete_many()
                .filter(renewals::Column::CardId.eq(card.id))
                .exec(&txn)
                .await?;
            notifications::Entity::delete_many()
                .filter(notifications::Column::CardId.eq(card.id))
                .exec(&txn)
                .await?;
        }
        billing::Entity::delete_many()
            .filter(billing::Column::CustomerId.eq(customer.id))
            .exec(&txn)
            .await?;
        if let Some(card) = card {
            cards::Entity::delete_by_id(card.id).exec(&txn).await?;
        }
        customers::Entity::delete_by_id(customer.id).exec(&txn).await?;

        txn.commit().await?;
        log::info!("Deleted customer {customer_id} and all owned records");
        Ok(())
    }
}
