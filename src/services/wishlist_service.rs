use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::wishlist::WishlistCount,
    entity::{
        products::Entity as Products,
        wishlist_items::{ActiveModel as WishlistItemActive, Column as WishlistItemCol, Entity as WishlistItems},
        wishlists::{ActiveModel as WishlistActive, Column as WishlistCol, Entity as Wishlists, Model as WishlistModel},
    },
    error::{AppError, AppResult},
    middleware::session::SessionKey,
    models::{Product, Wishlist, WishlistAction, WishlistToggle},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn resolve_wishlist<C: ConnectionTrait>(
    conn: &C,
    key: &SessionKey,
) -> AppResult<WishlistModel> {
    let existing = Wishlists::find()
        .filter(WishlistCol::SessionKey.eq(key.as_str()))
        .one(conn)
        .await?;
    if let Some(wishlist) = existing {
        return Ok(wishlist);
    }

    let now = Utc::now();
    let created = WishlistActive {
        id: Set(Uuid::new_v4()),
        session_key: Set(key.0.clone()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(conn)
    .await;

    match created {
        Ok(wishlist) => Ok(wishlist),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Wishlists::find()
                .filter(WishlistCol::SessionKey.eq(key.as_str()))
                .one(conn)
                .await?
                .ok_or(AppError::NotFound("Wishlist"))
        }
        Err(err) => Err(err.into()),
    }
}

async fn item_count<C: ConnectionTrait>(conn: &C, wishlist_id: Uuid) -> AppResult<i64> {
    Ok(WishlistItems::find()
        .filter(WishlistItemCol::WishlistId.eq(wishlist_id))
        .count(conn)
        .await? as i64)
}

pub async fn list_wishlist(
    state: &AppState,
    session: &SessionKey,
) -> AppResult<ApiResponse<Wishlist>> {
    let wishlist = resolve_wishlist(&state.orm, session).await?;
    let items: Vec<Product> = WishlistItems::find()
        .filter(WishlistItemCol::WishlistId.eq(wishlist.id))
        .find_also_related(Products)
        .order_by_desc(WishlistItemCol::AddedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(_, product)| product.map(Product::from))
        .collect();

    let count = items.len() as i64;
    Ok(ApiResponse::success(
        "Wishlist",
        Wishlist { items, count },
        Some(Meta::empty()),
    ))
}

pub async fn wishlist_count(
    state: &AppState,
    session: &SessionKey,
) -> AppResult<ApiResponse<WishlistCount>> {
    let wishlist = resolve_wishlist(&state.orm, session).await?;
    let count = item_count(&state.orm, wishlist.id).await?;
    Ok(ApiResponse::success(
        "Wishlist count",
        WishlistCount { count },
        Some(Meta::empty()),
    ))
}

/// Adds the product when absent, removes it when present.
pub async fn toggle(
    state: &AppState,
    session: &SessionKey,
    product_id: Uuid,
) -> AppResult<ApiResponse<WishlistToggle>> {
    let product = match Products::find_by_id(product_id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product")),
    };

    let wishlist = resolve_wishlist(&state.orm, session).await?;
    let existing = WishlistItems::find()
        .filter(WishlistItemCol::WishlistId.eq(wishlist.id))
        .filter(WishlistItemCol::ProductId.eq(product.id))
        .one(&state.orm)
        .await?;

    let action = match existing {
        Some(item) => {
            WishlistItems::delete_by_id(item.id).exec(&state.orm).await?;
            WishlistAction::Removed
        }
        None => {
            let inserted = WishlistItemActive {
                id: Set(Uuid::new_v4()),
                wishlist_id: Set(wishlist.id),
                product_id: Set(product.id),
                added_at: Set(Utc::now().into()),
            }
            .insert(&state.orm)
            .await;
            match inserted {
                Ok(_) => WishlistAction::Added,
                // Already added by a concurrent toggle.
                Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    WishlistAction::Added
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    let wishlist_count = item_count(&state.orm, wishlist.id).await?;

    if let Err(err) = log_audit(
        &state.orm,
        None,
        Some(session.as_str()),
        "wishlist_toggle",
        Some("wishlist_items"),
        Some(serde_json::json!({ "product_id": product.id, "action": action })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let message = match action {
        WishlistAction::Added => format!("{} added to wishlist", product.name),
        WishlistAction::Removed => format!("{} removed from wishlist", product.name),
    };
    Ok(ApiResponse::success(
        message,
        WishlistToggle {
            product_id: product.id,
            action,
            wishlist_count,
        },
        Some(Meta::empty()),
    ))
}

/// Removing a product that is not in the wishlist is not an error.
pub async fn remove(
    state: &AppState,
    session: &SessionKey,
    product_id: Uuid,
) -> AppResult<ApiResponse<WishlistCount>> {
    let wishlist = resolve_wishlist(&state.orm, session).await?;
    let result = WishlistItems::delete_many()
        .filter(WishlistItemCol::WishlistId.eq(wishlist.id))
        .filter(WishlistItemCol::ProductId.eq(product_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected > 0 {
        if let Err(err) = log_audit(
            &state.orm,
            None,
            Some(session.as_str()),
            "wishlist_remove",
            Some("wishlist_items"),
            Some(serde_json::json!({ "product_id": product_id })),
        )
        .await
        {
            tracing::warn!(error = %err, "audit log failed");
        }
    }

    let count = item_count(&state.orm, wishlist.id).await?;
    Ok(ApiResponse::success(
        "Removed from wishlist",
        WishlistCount { count },
        Some(Meta::empty()),
    ))
}
