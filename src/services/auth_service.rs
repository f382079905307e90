use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        auth::{Claims, LoginRequest, LoginResponse, Profile, RegisterRequest},
        orders::{OrderList, OrderWithItems},
    },
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, User},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::order_service,
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;
const RECENT_ORDERS: u64 = 5;

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Please enter a valid email address".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Validation("Email is already taken".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        role: Set("user".to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.id),
        None,
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    Ok(ApiResponse::success("User created", user.into(), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = Users::find()
        .filter(UserCol::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
    };

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.id),
        None,
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<UserModel> {
    match Users::find_by_id(user.user_id).one(&state.orm).await? {
        Some(u) => Ok(u),
        None => Err(AppError::NotFound("User")),
    }
}

/// Orders linked to the account, plus guest orders placed with its email.
fn orders_of(user: &UserModel) -> Select<Orders> {
    Orders::find().filter(
        Condition::any()
            .add(OrderCol::UserId.eq(user.id))
            .add(OrderCol::Email.eq(user.email.as_str())),
    )
}

pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Profile>> {
    let account = current_user(state, user).await?;
    let recent_orders = orders_of(&account)
        .order_by_desc(OrderCol::CreatedAt)
        .limit(RECENT_ORDERS)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::public)
        .collect();

    Ok(ApiResponse::success(
        "Profile",
        Profile {
            user: account.into(),
            recent_orders,
        },
        Some(Meta::empty()),
    ))
}

pub async fn order_history(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    let account = current_user(state, user).await?;
    let (page, limit, offset) = pagination.normalize();
    let finder = orders_of(&account).order_by_desc(OrderCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::public)
        .collect();

    Ok(ApiResponse::success(
        "Order history",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn order_detail(
    state: &AppState,
    user: &AuthUser,
    order_number: &str,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let account = current_user(state, user).await?;
    let order = orders_of(&account)
        .filter(OrderCol::OrderNumber.eq(order_number))
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    let items = order_service::load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "Order",
        OrderWithItems {
            order: Order::public(order),
            items,
        },
        Some(Meta::empty()),
    ))
}
