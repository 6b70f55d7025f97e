//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    contact::NewContact,
    contact_link::ContactLink,
    user::{User, UserCredentials},
};
use crate::domain::repository::{
    ContactDirectory, ContactLinkRepository, LoginExistence, UserRepository,
};
use crate::domain::value_object::{
    contact_id::ContactId, email::Email, login::Login, user_id::UserId,
};
use crate::error::{ProvisioningError, ProvisioningResult};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed provisioning repository
#[derive(Clone)]
pub struct PgProvisioningRepository {
    pool: PgPool,
}

impl PgProvisioningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of accounts created from a contact
    pub async fn count_links(&self) -> ProvisioningResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_links")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Name of the unique constraint a statement violated, if any
fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            db_err.constraint()
        }
        _ => None,
    }
}

// ============================================================================
// Login Existence Implementation
// ============================================================================

impl LoginExistence for PgProvisioningRepository {
    async fn login_exists(&self, login: &str) -> ProvisioningResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(login) = lower($1))",
        )
        .bind(login)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgProvisioningRepository {
    async fn create_user(
        &self,
        user: &User,
        credentials: &UserCredentials,
    ) -> ProvisioningResult<()> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                login,
                email,
                display_name,
                first_name,
                last_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.login.as_str())
        .bind(user.email.as_str())
        .bind(&user.display_name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            let conflict = match violated_constraint(&e) {
                Some("users_login_key" | "users_login_lower_key") => {
                    Some(ProvisioningError::LoginTaken(user.login.to_string()))
                }
                Some("users_email_key") => Some(ProvisioningError::EmailTaken),
                _ => None,
            };
            return Err(conflict.unwrap_or_else(|| e.into()));
        }

        sqlx::query(
            r#"
            INSERT INTO user_credentials (
                user_id,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(credentials.user_id.as_uuid())
        .bind(credentials.password_hash.as_phc_string())
        .bind(credentials.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> ProvisioningResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                login,
                email,
                display_name,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn email_exists(&self, email: &Email) -> ProvisioningResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Contact Link Repository Implementation
// ============================================================================

impl ContactLinkRepository for PgProvisioningRepository {
    async fn create_link(&self, link: &ContactLink) -> ProvisioningResult<()> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO contact_links (
                contact_id,
                user_id,
                uf_name,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(link.contact_id.value())
        .bind(link.user_id.as_uuid())
        .bind(link.uf_name.as_str())
        .bind(link.created_at)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(()),
            Err(e) if violated_constraint(&e) == Some("contact_links_pkey") => {
                Err(ProvisioningError::ContactAlreadyLinked(link.contact_id.value()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_link_by_contact(
        &self,
        contact_id: ContactId,
    ) -> ProvisioningResult<Option<ContactLink>> {
        let row = sqlx::query_as::<_, ContactLinkRow>(
            r#"
            SELECT
                contact_id,
                user_id,
                uf_name,
                created_at
            FROM contact_links
            WHERE contact_id = $1
            "#,
        )
        .bind(contact_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_link()))
    }

    async fn find_link_by_user(&self, user_id: &UserId) -> ProvisioningResult<Option<ContactLink>> {
        let row = sqlx::query_as::<_, ContactLinkRow>(
            r#"
            SELECT
                contact_id,
                user_id,
                uf_name,
                created_at
            FROM contact_links
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_link()))
    }
}

// ============================================================================
// Contact Directory Implementation
// ============================================================================

impl ContactDirectory for PgProvisioningRepository {
    async fn find_contact_by_email(&self, email: &Email) -> ProvisioningResult<Option<ContactId>> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT contact_id FROM contacts WHERE email = $1 ORDER BY contact_id LIMIT 1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(ContactId::new))
    }

    async fn create_contact(&self, contact: &NewContact) -> ProvisioningResult<ContactId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contacts (
                display_name,
                email,
                first_name,
                last_name
            ) VALUES ($1, $2, $3, $4)
            RETURNING contact_id
            "#,
        )
        .bind(&contact.display_name)
        .bind(contact.email.as_str())
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(ContactId::new(id))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    login: String,
    email: String,
    display_name: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            login: Login::from_db(self.login),
            email: Email::from_db(self.email),
            display_name: self.display_name,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactLinkRow {
    contact_id: i64,
    user_id: Uuid,
    uf_name: String,
    created_at: DateTime<Utc>,
}

impl ContactLinkRow {
    fn into_link(self) -> ContactLink {
        ContactLink {
            contact_id: ContactId::new(self.contact_id),
            user_id: UserId::from_uuid(self.user_id),
            uf_name: Email::from_db(self.uf_name),
            created_at: self.created_at,
        }
    }
}
