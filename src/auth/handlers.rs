use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, verify_token};
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::model::role::Role;
use crate::models::{LoginReq, RegisterReq, TokenType, UserSql};

/// Starting balances for a freshly registered employee profile.
const DEFAULT_VACATION_BALANCE: i32 = 20;
const DEFAULT_SICK_BALANCE: i32 = 10;

#[derive(Deserialize)]
pub struct RefreshReq {
    pub refresh_token: String,
}

/// Creates the employee profile and the credential row for it.
pub async fn register(
    payload: web::Json<RegisterReq>,
    pool: web::Data<MySqlPool>,
) -> impl Responder {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();
    let role = payload.role.unwrap_or(Role::Employee);

    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Name, email and password must not be empty"
        }));
    }

    let profile = sqlx::query(
        r#"
        INSERT INTO employees (name, role, vacation_balance, sick_balance, email)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(role)
    .bind(DEFAULT_VACATION_BALANCE)
    .bind(DEFAULT_SICK_BALANCE)
    .bind(&email)
    .execute(pool.get_ref())
    .await;

    let employee_id = match profile {
        Ok(result) => result.last_insert_id(),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code() == Some("23000".into()) {
                    return HttpResponse::Conflict().json(json!({
                        "error": "Email already registered"
                    }));
                }
            }
            error!(error = %e, "Failed to create employee profile");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register"
            }));
        }
    };

    let hashed = hash_password(&payload.password);
    let credentials = sqlx::query(
        r#"INSERT INTO users (email, password, employee_id) VALUES (?, ?, ?)"#,
    )
    .bind(&email)
    .bind(&hashed)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await;

    match credentials {
        Ok(_) => {
            info!(employee_id, "registered new employee account");
            HttpResponse::Created().json(json!({
                "message": "Registered successfully",
                "employee_id": employee_id
            }))
        }
        Err(e) => {
            error!(error = %e, employee_id, "Failed to create credentials");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register"
            }))
        }
    }
}

pub async fn login(
    payload: web::Json<LoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let email = payload.email.trim().to_lowercase();

    let user = sqlx::query_as::<_, UserSql>(
        r#"
        SELECT u.id, u.email, u.password, u.employee_id, e.role
        FROM users u
        JOIN employees e ON e.id = u.employee_id
        WHERE u.email = ?
        "#,
    )
    .bind(&email)
    .fetch_optional(pool.get_ref())
    .await;

    let user = match user {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(json!({
                "error": "Invalid email or password"
            }));
        }
        Err(e) => {
            error!(error = %e, "Login lookup failed");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }));
        }
    };

    if verify_password(&payload.password, &user.password).is_err() {
        return HttpResponse::Unauthorized().json(json!({
            "error": "Invalid email or password"
        }));
    }

    let access_token = generate_access_token(
        user.id,
        user.email.clone(),
        user.role.as_id(),
        user.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );
    let refresh_token = generate_refresh_token(
        user.id,
        user.email,
        user.role.as_id(),
        user.employee_id,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "token_type": "Bearer",
        "expires_in": config.access_token_ttl
    }))
}

pub async fn refresh_token(
    payload: web::Json<RefreshReq>,
    config: web::Data<Config>,
) -> impl Responder {
    let claims = match verify_token(&payload.refresh_token, &config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::Unauthorized().json(json!({
                "error": "Invalid or expired refresh token",
                "details": e
            }));
        }
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().json(json!({
            "error": "Access token cannot be used to refresh"
        }));
    }

    let access_token = generate_access_token(
        claims.user_id,
        claims.sub,
        claims.role,
        claims.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": config.access_token_ttl
    }))
}

/// Sessions are stateless JWTs; the client discards its tokens and the
/// identity resolver re-reads state per request, so nothing is cached
/// server-side to invalidate.
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Logged out"
    }))
}
