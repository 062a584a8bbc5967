//! Route table.
//!
//! Returns a composable `Router`; paths mirror what the mobile app
//! already calls, including the `/medication/frequency/*` nesting and the
//! batch `/update/list` variants.
//!
//! NOTE: path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

pub fn app_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::users::list))
        // Frequencies are registered before the medication param routes
        // only for readability; matchit resolves static segments first.
        .route(
            "/medication/frequency/add",
            put(endpoints::frequencies::add),
        )
        .route(
            "/medication/frequency/update",
            put(endpoints::frequencies::update),
        )
        .route(
            "/medication/frequency/update/list",
            put(endpoints::frequencies::update_list),
        )
        .route(
            "/medication/frequency/:user_id",
            get(endpoints::frequencies::list),
        )
        .route(
            "/medication/frequency/:user_id/:frequency_id",
            delete(endpoints::frequencies::remove),
        )
        .route("/medication/add", put(endpoints::medications::add))
        .route("/medication/update", put(endpoints::medications::update))
        .route(
            "/medication/update/list",
            put(endpoints::medications::update_list),
        )
        .route("/medication/:user_id", get(endpoints::medications::list))
        .route(
            "/medication/:user_id/:medication_id",
            delete(endpoints::medications::remove),
        )
        .route(
            "/appointment",
            post(endpoints::appointments::add).put(endpoints::appointments::update),
        )
        .route(
            "/appointment/list",
            put(endpoints::appointments::update_list),
        )
        .route("/appointment/:user_id", get(endpoints::appointments::list))
        .route(
            "/appointment/:user_id/:appointment_id",
            delete(endpoints::appointments::remove),
        )
        .route("/user/setting", put(endpoints::settings::update))
        .route("/user/setting/:user_id", get(endpoints::settings::get))
        .route(
            "/emergency/contact/update",
            put(endpoints::contacts::update),
        )
        .route(
            "/emergency/contact/update/list",
            put(endpoints::contacts::update_list),
        )
        .route(
            "/emergency/contact/:user_id",
            get(endpoints::contacts::list).delete(endpoints::contacts::remove_batch),
        )
        .route(
            "/notification/update",
            put(endpoints::notifications::update),
        )
        .route(
            "/notification/update/list",
            put(endpoints::notifications::update_list),
        )
        .route(
            "/notification/:user_id",
            get(endpoints::notifications::list),
        )
        .route("/sendEmergency", post(endpoints::emergency::send))
        .with_state(ctx)
}
