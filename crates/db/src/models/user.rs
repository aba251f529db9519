use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    #[default]
    Admin,
    SuperAdmin,
}

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// A dashboard account. The password hash never leaves this crate;
/// handlers return [`UserInfo`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub section: Option<String>,
    pub sex: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API-safe projection of a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UserInfo {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: UserRole,
    pub section: Option<String>,
    pub sex: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            role: user.role,
            section: user.section,
            sex: user.sex,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub section: Option<String>,
    pub sex: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// When present, the password is re-hashed and replaced.
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub section: Option<String>,
    pub sex: Option<String>,
    pub status: Option<UserStatus>,
}

const USER_COLUMNS: &str = "id, firstname, lastname, email, password_hash, role, section, \
     sex, status, created_at, updated_at";

impl User {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateUser,
        password_hash: &str,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let role = data.role.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO users (id, firstname, lastname, email, password_hash, role, section, sex)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(password_hash)
        .bind(role)
        .bind(&data.section)
        .bind(&data.sex)
        .fetch_one(pool)
        .await
    }

    /// Full-row update; `password_hash` of `None` keeps the stored hash.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateUser,
        password_hash: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let role = data.role.clone().unwrap_or_default();
        let status = data.status.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE users
               SET firstname = $2, lastname = $3, email = $4,
                   password_hash = COALESCE($5, password_hash),
                   role = $6, section = $7, sex = $8, status = $9,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(password_hash)
        .bind(role)
        .bind(&data.section)
        .bind(&data.sex)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::password::{hash_password, verify_password};

    fn sample_user() -> CreateUser {
        CreateUser {
            firstname: "Liza".to_string(),
            lastname: "Torres".to_string(),
            email: "liza@agri.local".to_string(),
            password: "s3cret".to_string(),
            role: Some(UserRole::SuperAdmin),
            section: Some("Operations".to_string()),
            sex: Some("female".to_string()),
        }
    }

    #[sqlx::test]
    async fn create_stores_hash_and_lookup_by_email(pool: SqlitePool) {
        let data = sample_user();
        let hash = hash_password(&data.password);
        let user = User::create(&pool, &data, &hash, Uuid::new_v4()).await.unwrap();
        assert_eq!(user.role, UserRole::SuperAdmin);
        assert_eq!(user.status, UserStatus::Active);

        let found = User::find_by_email(&pool, "liza@agri.local")
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password("s3cret", &found.password_hash));
    }

    #[sqlx::test]
    async fn update_without_password_keeps_hash(pool: SqlitePool) {
        let data = sample_user();
        let hash = hash_password(&data.password);
        let user = User::create(&pool, &data, &hash, Uuid::new_v4()).await.unwrap();

        let updated = User::update(
            &pool,
            user.id,
            &UpdateUser {
                firstname: "Liza".to_string(),
                lastname: "Torres-Reyes".to_string(),
                email: "liza@agri.local".to_string(),
                password: None,
                role: Some(UserRole::SuperAdmin),
                section: None,
                sex: None,
                status: Some(UserStatus::Inactive),
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.lastname, "Torres-Reyes");
        assert_eq!(updated.status, UserStatus::Inactive);
        assert_eq!(updated.password_hash, user.password_hash);
    }
}
