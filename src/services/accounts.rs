use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{self, AdminLevel, TokenSubject, UserType};
use crate::db::DbPool;
use crate::dto::auth::{
    LoginRequest, RegisterAdminRequest, RegisterCustomerRequest, RegisterPharmacistRequest,
    UserProfile,
};
use crate::entities::{admin, customer, pharmacist};
use crate::errors::ServiceError;

/// Well-formed argon2id hash (default parameters) that matches no password.
/// Login verifies against it when no row matched the email, so unknown email
/// and wrong password take comparable time.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$Z8yIW2nXUllqmK6rEOgGdA$1w8xh+lPiHqzGyV0Y1h5Wn0ZfZ2K9Yqk3mUQ2r8N9uM";

/// An account row from whichever of the three role tables matched.
#[derive(Debug, Clone)]
pub enum Account {
    Customer(customer::Model),
    Pharmacist(pharmacist::Model),
    Admin(admin::Model),
}

impl Account {
    pub fn id(&self) -> Uuid {
        match self {
            Account::Customer(m) => m.id,
            Account::Pharmacist(m) => m.id,
            Account::Admin(m) => m.id,
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            Account::Customer(_) => UserType::Customer,
            Account::Pharmacist(_) => UserType::Pharmacist,
            Account::Admin(_) => UserType::Admin,
        }
    }

    fn password_hash(&self) -> &str {
        match self {
            Account::Customer(m) => &m.password_hash,
            Account::Pharmacist(m) => &m.password_hash,
            Account::Admin(m) => &m.password_hash,
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Account::Customer(m) => m.is_active,
            Account::Pharmacist(m) => m.is_active,
            Account::Admin(m) => m.is_active,
        }
    }

    pub fn profile(&self) -> UserProfile {
        match self {
            Account::Customer(m) => UserProfile::from(m),
            Account::Pharmacist(m) => UserProfile::from(m),
            Account::Admin(m) => UserProfile::from(m),
        }
    }

    pub fn token_subject(&self) -> TokenSubject {
        let profile = self.profile();
        TokenSubject {
            id: profile.user_id,
            email: profile.email,
            user_type: profile.user_type,
            pharmacist_role: profile.pharmacist_role,
            admin_level: profile.admin_level,
        }
    }
}

/// Registration, login dispatch, and profile lookup across the three
/// role-partitioned user tables.
#[derive(Clone)]
pub struct AccountService {
    db: Arc<DbPool>,
}

impl AccountService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Registers a customer account. Public endpoint.
    #[instrument(skip(self, req))]
    pub async fn register_customer(
        &self,
        req: RegisterCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        self.ensure_identity_unused(&req.email, &req.phone).await?;

        let now = Utc::now();
        let model = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(req.email.to_lowercase()),
            phone: Set(req.phone),
            password_hash: Set(auth::hash_password(&req.password)?),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            date_of_birth: Set(req.date_of_birth),
            emergency_contact_name: Set(req.emergency_contact_name),
            emergency_contact_phone: Set(req.emergency_contact_phone),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&*self.db).await?;
        info!(customer_id = %created.id, "customer registered");
        Ok(created)
    }

    /// Registers a pharmacist; `assigned_by` is the admin performing the
    /// registration.
    #[instrument(skip(self, req))]
    pub async fn register_pharmacist(
        &self,
        req: RegisterPharmacistRequest,
        assigned_by: Uuid,
    ) -> Result<pharmacist::Model, ServiceError> {
        self.ensure_identity_unused(&req.email, &req.phone).await?;

        let now = Utc::now();
        let model = pharmacist::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(req.email.to_lowercase()),
            phone: Set(req.phone),
            password_hash: Set(auth::hash_password(&req.password)?),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            date_of_birth: Set(req.date_of_birth),
            pharmacist_role: Set(req.pharmacist_role.to_string()),
            license_number: Set(req.license_number),
            license_state: Set(req.license_state),
            license_expiry_date: Set(req.license_expiry_date),
            assigned_by: Set(Some(assigned_by)),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&*self.db).await?;
        info!(pharmacist_id = %created.id, %assigned_by, "pharmacist registered");
        Ok(created)
    }

    /// Registers an admin account.
    #[instrument(skip(self, req))]
    pub async fn register_admin(
        &self,
        req: RegisterAdminRequest,
    ) -> Result<admin::Model, ServiceError> {
        self.ensure_identity_unused(&req.email, &req.phone).await?;

        let now = Utc::now();
        let model = admin::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(req.email.to_lowercase()),
            phone: Set(req.phone),
            password_hash: Set(auth::hash_password(&req.password)?),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            admin_level: Set(req.admin_level.unwrap_or(AdminLevel::Standard).to_string()),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&*self.db).await?;
        info!(admin_id = %created.id, "admin registered");
        Ok(created)
    }

    /// Password login. When `user_type` is given only that table is
    /// consulted; otherwise customers, then pharmacists, then admins.
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, req))]
    pub async fn login(&self, req: LoginRequest) -> Result<Account, ServiceError> {
        let email = req.email.to_lowercase();

        let account = match req.user_type {
            Some(user_type) => self.find_by_email(user_type, &email).await?,
            None => {
                let mut found = None;
                for user_type in [UserType::Customer, UserType::Pharmacist, UserType::Admin] {
                    if let Some(account) = self.find_by_email(user_type, &email).await? {
                        found = Some(account);
                        break;
                    }
                }
                found
            }
        };

        let account = match account {
            Some(account) => account,
            None => {
                auth::verify_password(&req.password, DUMMY_PASSWORD_HASH);
                return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
            }
        };

        if !auth::verify_password(&req.password, account.password_hash()) {
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }
        if !account.is_active() {
            return Err(ServiceError::Unauthorized(
                "Account is deactivated".to_string(),
            ));
        }

        self.record_login(&account).await?;
        info!(user_id = %account.id(), user_type = %account.user_type(), "login succeeded");
        Ok(account)
    }

    /// Reload the account behind a validated token; used by `/auth/me`.
    /// Fails closed when the row has been removed or deactivated since the
    /// token was issued.
    #[instrument(skip(self))]
    pub async fn load_account(
        &self,
        user_type: UserType,
        id: Uuid,
    ) -> Result<Account, ServiceError> {
        let account = match user_type {
            UserType::Customer => customer::Entity::find_by_id(id)
                .one(&*self.db)
                .await?
                .map(Account::Customer),
            UserType::Pharmacist => pharmacist::Entity::find_by_id(id)
                .one(&*self.db)
                .await?
                .map(Account::Pharmacist),
            UserType::Admin => admin::Entity::find_by_id(id)
                .one(&*self.db)
                .await?
                .map(Account::Admin),
        };

        let account = account
            .ok_or_else(|| ServiceError::Unauthorized("Account no longer exists".to_string()))?;
        if !account.is_active() {
            return Err(ServiceError::Unauthorized(
                "Account is deactivated".to_string(),
            ));
        }
        Ok(account)
    }

    async fn find_by_email(
        &self,
        user_type: UserType,
        email: &str,
    ) -> Result<Option<Account>, ServiceError> {
        let account = match user_type {
            UserType::Customer => customer::Entity::find()
                .filter(customer::Column::Email.eq(email))
                .one(&*self.db)
                .await?
                .map(Account::Customer),
            UserType::Pharmacist => pharmacist::Entity::find()
                .filter(pharmacist::Column::Email.eq(email))
                .one(&*self.db)
                .await?
                .map(Account::Pharmacist),
            UserType::Admin => admin::Entity::find()
                .filter(admin::Column::Email.eq(email))
                .one(&*self.db)
                .await?
                .map(Account::Admin),
        };
        Ok(account)
    }

    /// Email and phone must be unused across all three tables: login scans
    /// the tables in a fixed order, so a duplicate in a later table could
    /// never log in.
    async fn ensure_identity_unused(&self, email: &str, phone: &str) -> Result<(), ServiceError> {
        let email = email.to_lowercase();

        let email_taken = customer::Entity::find()
            .filter(customer::Column::Email.eq(email.as_str()))
            .count(&*self.db)
            .await?
            + pharmacist::Entity::find()
                .filter(pharmacist::Column::Email.eq(email.as_str()))
                .count(&*self.db)
                .await?
            + admin::Entity::find()
                .filter(admin::Column::Email.eq(email.as_str()))
                .count(&*self.db)
                .await?;
        if email_taken > 0 {
            return Err(ServiceError::Conflict(format!(
                "An account with email {email} already exists"
            )));
        }

        let phone_taken = customer::Entity::find()
            .filter(customer::Column::Phone.eq(phone))
            .count(&*self.db)
            .await?
            + pharmacist::Entity::find()
                .filter(pharmacist::Column::Phone.eq(phone))
                .count(&*self.db)
                .await?
            + admin::Entity::find()
                .filter(admin::Column::Phone.eq(phone))
                .count(&*self.db)
                .await?;
        if phone_taken > 0 {
            return Err(ServiceError::Conflict(format!(
                "An account with phone {phone} already exists"
            )));
        }

        Ok(())
    }

    async fn record_login(&self, account: &Account) -> Result<(), ServiceError> {
        let now = Utc::now();
        match account {
            Account::Customer(m) => {
                let mut active: customer::ActiveModel = m.clone().into();
                active.last_login_at = Set(Some(now));
                active.update(&*self.db).await?;
            }
            Account::Pharmacist(m) => {
                let mut active: pharmacist::ActiveModel = m.clone().into();
                active.last_login_at = Set(Some(now));
                active.update(&*self.db).await?;
            }
            Account::Admin(m) => {
                let mut active: admin::ActiveModel = m.clone().into();
                active.last_login_at = Set(Some(now));
                active.update(&*self.db).await?;
            }
        }
        Ok(())
    }
}
