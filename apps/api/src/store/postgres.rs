use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::pack::{MarketData, Pack};
use crate::models::session::{ChatMessage, ConfidenceScore, RolePlaySession};
use crate::store::{PackStore, SessionStore, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PackRow {
    id: Uuid,
    user_id: Uuid,
    job_title: String,
    city_or_remote: String,
    current_salary: i64,
    target_salary: Option<i64>,
    achievements: Vec<String>,
    market_data: Json<MarketData>,
    negotiation_content: String,
    created_at: DateTime<Utc>,
}

impl From<PackRow> for Pack {
    fn from(row: PackRow) -> Self {
        Pack {
            id: row.id,
            user_id: row.user_id,
            job_title: row.job_title,
            city_or_remote: row.city_or_remote,
            current_salary: row.current_salary,
            target_salary: row.target_salary,
            achievements: row.achievements,
            market_data: row.market_data.0,
            negotiation_content: row.negotiation_content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    id: Uuid,
    pack_id: Uuid,
    messages: Json<Vec<ChatMessage>>,
    confidence_score: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for RolePlaySession {
    type Error = StoreError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let confidence_score =
            ConfidenceScore::new(i64::from(row.confidence_score)).ok_or_else(|| {
                StoreError::Corrupt(format!(
                    "session {} has confidence_score {}",
                    row.id, row.confidence_score
                ))
            })?;

        Ok(RolePlaySession {
            id: row.id,
            pack_id: row.pack_id,
            messages: row.messages.0,
            confidence_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PackStore for PgStore {
    async fn insert_pack(&self, pack: &Pack) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO packs
                (id, user_id, job_title, city_or_remote, current_salary, target_salary,
                 achievements, market_data, negotiation_content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(pack.id)
        .bind(pack.user_id)
        .bind(&pack.job_title)
        .bind(&pack.city_or_remote)
        .bind(pack.current_salary)
        .bind(pack.target_salary)
        .bind(&pack.achievements)
        .bind(Json(&pack.market_data))
        .bind(&pack.negotiation_content)
        .bind(pack.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_pack(&self, owner_id: Uuid, pack_id: Uuid) -> Result<Option<Pack>, StoreError> {
        let row = sqlx::query_as::<_, PackRow>(
            "SELECT * FROM packs WHERE id = $1 AND user_id = $2",
        )
        .bind(pack_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Pack::from))
    }

    async fn list_packs(&self, owner_id: Uuid) -> Result<Vec<Pack>, StoreError> {
        let rows = sqlx::query_as::<_, PackRow>(
            "SELECT * FROM packs WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Pack::from).collect())
    }

    async fn delete_pack(&self, owner_id: Uuid, pack_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM packs WHERE id = $1 AND user_id = $2")
            .bind(pack_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn find_session_by_pack(
        &self,
        pack_id: Uuid,
    ) -> Result<Option<RolePlaySession>, StoreError> {
        sqlx::query_as::<_, SessionRow>("SELECT * FROM roleplay_sessions WHERE pack_id = $1")
            .bind(pack_id)
            .fetch_optional(&self.pool)
            .await?
            .map(RolePlaySession::try_from)
            .transpose()
    }

    async fn find_session(&self, session_id: Uuid) -> Result<Option<RolePlaySession>, StoreError> {
        sqlx::query_as::<_, SessionRow>("SELECT * FROM roleplay_sessions WHERE id = $1")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?
            .map(RolePlaySession::try_from)
            .transpose()
    }

    async fn upsert_messages(
        &self,
        pack_id: Uuid,
        messages: &[ChatMessage],
        now: DateTime<Utc>,
    ) -> Result<RolePlaySession, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO roleplay_sessions
                (id, pack_id, messages, confidence_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (pack_id) DO UPDATE
                SET messages = EXCLUDED.messages,
                    updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(pack_id)
        .bind(Json(messages))
        .bind(i16::from(ConfidenceScore::default().get()))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        RolePlaySession::try_from(row)
    }

    async fn update_confidence(
        &self,
        session_id: Uuid,
        score: ConfidenceScore,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE roleplay_sessions SET confidence_score = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(i16::from(score.get()))
        .bind(now)
        .bind(session_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_session_for_pack(&self, pack_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM roleplay_sessions WHERE pack_id = $1")
            .bind(pack_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
