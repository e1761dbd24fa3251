//! Route configuration for the HTTP adapter.

use actix_web::web;

use super::accounts::{
    create_account, delete_account, get_account, list_accounts, update_account,
};
use super::health::{live, ready};

/// Register the versioned API scope and the health probes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(list_accounts)
            .service(create_account)
            .service(get_account)
            .service(update_account)
            .service(delete_account),
    )
    .service(ready)
    .service(live);
}
