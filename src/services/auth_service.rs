use crate::config::BusinessConfig;
use crate::entities::{
    admin_entity as admins, customer_entity as customers, marketer_entity as marketers,
};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, LoginRole, RefreshRequest};
use crate::utils::{JwtService, PrincipalRole, normalize_phone, verify_password};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
    business: BusinessConfig,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService, business: BusinessConfig) -> Self {
        Self {
            pool,
            jwt_service,
            business,
        }
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let role: PrincipalRole = req.role.into();
        let (principal_id, password_hash) = match req.role {
            LoginRole::Customer => {
                let phone = normalize_phone(&req.identity, &self.business.default_country_code)?;
                let customer = customers::Entity::find()
                    .filter(customers::Column::Phone.eq(phone))
                    .one(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;
                if !customer.can_login {
                    return Err(AppError::AuthError(
                        "This account cannot log in yet".to_string(),
                    ));
                }
                (customer.id, customer.password_hash)
            }
            LoginRole::Marketer => {
                let phone = normalize_phone(&req.identity, &self.business.default_country_code)?;
                let marketer = marketers::Entity::find()
                    .filter(marketers::Column::Phone.eq(phone))
                    .one(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;
                (marketer.id, marketer.password_hash)
            }
            LoginRole::Admin => {
                let admin = admins::Entity::find()
                    .filter(admins::Column::Username.eq(req.identity.clone()))
                    .one(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;
                (admin.id, Some(admin.password_hash))
            }
        };

        let hash = password_hash
            .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;
        if !verify_password(&req.password, &hash)? {
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        Ok(AuthResponse {
            access_token: self.jwt_service.generate_access_token(principal_id, role)?,
            refresh_token: self.jwt_service.generate_refresh_token(principal_id, role)?,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub async fn refresh(&self, req: RefreshRequest) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(&req.refresh_token)?;
        let principal_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        Ok(AuthResponse {
            access_token: self
                .jwt_service
                .generate_access_token(principal_id, claims.role)?,
            refresh_token: self
                .jwt_service
                .generate_refresh_token(principal_id, claims.role)?,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
