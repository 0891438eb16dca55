//! PostgreSQL implementation of SessionStore.
//!
//! Persists Session aggregates. The overlap query matches half-open
//! intervals in SQL so the conflict check never has to page whole
//! calendars into memory.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, PatientId, SessionId, TherapistId, Timestamp,
};
use crate::domain::scheduling::{Modality, Session, SessionStatus, TimeSlot, VideoLink};
use crate::ports::SessionStore;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, therapist_id, patient_id, start_at, duration_minutes,
           modality, status, video_link, recording_url, therapist_note,
           created_at, updated_at
    FROM sessions
"#;

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, therapist_id, patient_id, start_at, duration_minutes,
                modality, status, video_link, recording_url, therapist_note,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.therapist_id().as_uuid())
        .bind(session.patient_id().as_uuid())
        .bind(session.slot().start().as_datetime())
        .bind(session.slot().duration_minutes() as i32)
        .bind(modality_to_str(session.modality()))
        .bind(session.status().to_string())
        .bind(session.video_link().map(|l| l.as_str()))
        .bind(session.recording_url())
        .bind(session.therapist_note())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert session", e))?;

        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                status = $2,
                video_link = $3,
                recording_url = $4,
                therapist_note = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.status().to_string())
        .bind(session.video_link().map(|l| l.as_str()))
        .bind(session.recording_url())
        .bind(session.therapist_note())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn find_by_therapist(&self, id: &TherapistId) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE therapist_id = $1 ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch sessions by therapist", e))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn find_by_patient(&self, id: &PatientId) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE patient_id = $1 ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch sessions by patient", e))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn find_overlapping(
        &self,
        therapist: &TherapistId,
        slot: &TimeSlot,
    ) -> Result<Vec<Session>, DomainError> {
        // Half-open intervals: [start, start + duration)
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE therapist_id = $1
              AND start_at < $3
              AND start_at + make_interval(mins => duration_minutes) > $2
            "#,
            SELECT_COLUMNS
        ))
        .bind(therapist.as_uuid())
        .bind(slot.start().as_datetime())
        .bind(slot.end().as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch overlapping sessions", e))?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn modality_to_str(modality: Modality) -> &'static str {
    match modality {
        Modality::Online => "ONLINE",
        Modality::InPerson => "IN_PERSON",
    }
}

fn str_to_modality(s: &str) -> Result<Modality, DomainError> {
    match s {
        "ONLINE" => Ok(Modality::Online),
        "IN_PERSON" => Ok(Modality::InPerson),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid modality: {}", s),
        )),
    }
}

fn str_to_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "PENDING_PAYMENT" => Ok(SessionStatus::PendingPayment),
        "SCHEDULED" => Ok(SessionStatus::Scheduled),
        "COMPLETED" => Ok(SessionStatus::Completed),
        "CANCELLED" => Ok(SessionStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;
    let therapist_id: uuid::Uuid = row
        .try_get("therapist_id")
        .map_err(|e| db_error("Failed to get therapist_id", e))?;
    let patient_id: uuid::Uuid = row
        .try_get("patient_id")
        .map_err(|e| db_error("Failed to get patient_id", e))?;
    let start_at: chrono::DateTime<chrono::Utc> = row
        .try_get("start_at")
        .map_err(|e| db_error("Failed to get start_at", e))?;
    let duration_minutes: i32 = row
        .try_get("duration_minutes")
        .map_err(|e| db_error("Failed to get duration_minutes", e))?;
    let modality_str: String = row
        .try_get("modality")
        .map_err(|e| db_error("Failed to get modality", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_error("Failed to get status", e))?;
    let video_link: Option<String> = row
        .try_get("video_link")
        .map_err(|e| db_error("Failed to get video_link", e))?;
    let recording_url: Option<String> = row
        .try_get("recording_url")
        .map_err(|e| db_error("Failed to get recording_url", e))?;
    let therapist_note: Option<String> = row
        .try_get("therapist_note")
        .map_err(|e| db_error("Failed to get therapist_note", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("Failed to get updated_at", e))?;

    let slot = TimeSlot::new(
        Timestamp::from_datetime(start_at),
        i64::from(duration_minutes),
    )
    .map_err(|e| db_error("Invalid stored slot", e))?;

    let video_link = video_link
        .map(VideoLink::new)
        .transpose()
        .map_err(|e| db_error("Invalid stored video link", e))?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        TherapistId::from_uuid(therapist_id),
        PatientId::from_uuid(patient_id),
        slot,
        str_to_modality(&modality_str)?,
        str_to_status(&status_str)?,
        video_link,
        recording_url,
        therapist_note,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
