//! Account administration HTTP handlers.
//!
//! ```text
//! GET    /api/v1/accounts
//! POST   /api/v1/accounts
//! GET    /api/v1/accounts/{id}
//! PUT    /api/v1/accounts/{id}
//! DELETE /api/v1/accounts/{id}
//! ```
//!
//! Authentication and authorization happen upstream; by the time a request
//! reaches these handlers the caller has been verified as an administrator.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    AccountChangesRequest, AccountId, DirectoryError, NewAccountRequest, UserAccount,
};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Request payload for creating an account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreateAccountBody {
    #[schema(example = "alice")]
    pub user_name: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "ID1")]
    pub id_card: Option<String>,
    #[schema(value_type = Option<String>, example = "1990-01-01")]
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "P@ssw0rd!")]
    pub password: Option<String>,
}

/// Request payload for updating an account; the password is never updated
/// through this endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UpdateAccountBody {
    #[schema(example = "alice")]
    pub user_name: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "ID1")]
    pub id_card: Option<String>,
    #[schema(value_type = Option<String>, example = "1990-01-01")]
    pub birth_date: Option<NaiveDate>,
}

/// Account as rendered to clients; the password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    #[schema(example = "alice")]
    pub user_name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "ID1")]
    pub id_card: String,
    #[schema(value_type = String, example = "1990-01-01")]
    pub birth_date: NaiveDate,
}

impl From<UserAccount> for AccountResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: *account.id().as_uuid(),
            user_name: account.user_name().to_string(),
            email: account.email().to_string(),
            id_card: account.id_card().to_string(),
            birth_date: account.birth_date(),
        }
    }
}

/// An identifier that fails to parse cannot resolve to a live record, so it
/// reports the same way as an unknown one.
fn parse_account_id(raw: &str) -> Result<AccountId, DirectoryError> {
    AccountId::new(raw).map_err(|_| DirectoryError::NotFound)
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "All live accounts", body = [AccountResponse]),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "listAccounts"
)]
#[get("/accounts")]
pub async fn list_accounts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let accounts = state.directory.list().await?;
    Ok(web::Json(
        accounts.into_iter().map(AccountResponse::from).collect(),
    ))
}

/// Fetch a single account.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "The account", body = AccountResponse),
        (status = 404, description = "Account not found", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "getAccount"
)]
#[get("/accounts/{id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountResponse>> {
    let id = parse_account_id(&path)?;
    let account = state.directory.get_by_id(&id).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountBody,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "createAccount"
)]
#[post("/accounts")]
pub async fn create_account(
    state: web::Data<HttpState>,
    body: web::Json<CreateAccountBody>,
) -> ApiResult<HttpResponse> {
    let payload = body.into_inner();
    let request = NewAccountRequest {
        user_name: payload.user_name.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
        id_card: payload.id_card.unwrap_or_default(),
        birth_date: payload.birth_date,
        password: payload.password.unwrap_or_default(),
    };

    let account = state.directory.create(request).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Update an account's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    request_body = UpdateAccountBody,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Account not found", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "updateAccount"
)]
#[put("/accounts/{id}")]
pub async fn update_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<UpdateAccountBody>,
) -> ApiResult<web::Json<AccountResponse>> {
    let id = parse_account_id(&path)?;
    let payload = body.into_inner();
    let request = AccountChangesRequest {
        user_name: payload.user_name.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
        id_card: payload.id_card.unwrap_or_default(),
        birth_date: payload.birth_date,
    };

    let account = state.directory.update(&id, request).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

/// Delete an account.
///
/// Deleting an identifier that is already gone reports 404; callers are
/// expected to treat that as "already gone" rather than a fault.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/accounts/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_account_id(&path)?;
    state.directory.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
