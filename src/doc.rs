//! OpenAPI documentation configuration.
//!
//! Registers the account endpoints, the health probes, and the payload
//! schemas. The generated specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::accounts::{AccountResponse, CreateAccountBody, UpdateAccountBody};
use crate::inbound::http::error::{ErrorBody, ViolationBody};
use crate::inbound::http::{accounts, health};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Directory API",
        description = "User-administration endpoints. Requests are expected to \
                       arrive through an authenticating gateway."
    ),
    paths(
        accounts::list_accounts,
        accounts::get_account,
        accounts::create_account,
        accounts::update_account,
        accounts::delete_account,
        health::ready,
        health::live,
    ),
    components(schemas(
        AccountResponse,
        CreateAccountBody,
        UpdateAccountBody,
        ErrorBody,
        ViolationBody,
    )),
    tags(
        (name = "accounts", description = "Account administration"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_lists_all_account_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/accounts"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/accounts/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/ready"));
    }
}
