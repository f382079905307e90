use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, SqlErr};
use uuid::Uuid;

use crate::{
    entity::sessions::{ActiveModel as SessionActive, Entity as Sessions, Model as SessionModel},
    error::{AppError, AppResult},
    middleware::session::SessionKey,
};

/// Fetches the session row, creating it on first use.
pub async fn load<C: ConnectionTrait>(conn: &C, key: &SessionKey) -> AppResult<SessionModel> {
    if let Some(existing) = Sessions::find_by_id(key.0.clone()).one(conn).await? {
        return Ok(existing);
    }

    let now = Utc::now();
    let created = SessionActive {
        session_key: Set(key.0.clone()),
        currency_code: Set(None),
        delivery_zone_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(conn)
    .await;

    match created {
        Ok(session) => Ok(session),
        // Another request created it first.
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Sessions::find_by_id(key.0.clone())
                .one(conn)
                .await?
                .ok_or(AppError::NotFound("Session"))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn set_currency<C: ConnectionTrait>(
    conn: &C,
    key: &SessionKey,
    code: Option<String>,
) -> AppResult<SessionModel> {
    let session = load(conn, key).await?;
    let mut active: SessionActive = session.into();
    active.currency_code = Set(code);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(conn).await?)
}

pub async fn set_delivery_zone<C: ConnectionTrait>(
    conn: &C,
    key: &SessionKey,
    zone_id: Option<Uuid>,
) -> AppResult<SessionModel> {
    let session = load(conn, key).await?;
    let mut active: SessionActive = session.into();
    active.delivery_zone_id = Set(zone_id);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(conn).await?)
}
