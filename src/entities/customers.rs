use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    /// Canonical international form, `+<digits>`.
    #[sea_orm(unique)]
    pub phone: String,
    pub id_number: Option<String>,
    pub location: Option<String>,
    pub can_login: bool,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Months purchased up front at registration; informational membership field,
    /// independent of the card's rolling validity window.
    pub membership_months: i32,
    pub membership_valid_until: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
