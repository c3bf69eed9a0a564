//! API Router
//!
//! Every JSON route lives under `/api`.

use salvo::Router;

use crate::{healthcheck, proposals, usages};

pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(
            Router::with_path("proposals")
                .get(proposals::index::handler)
                .post(proposals::create::handler)
                .delete(proposals::clear::handler)
                .push(Router::with_path("ping").get(proposals::ping::handler))
                .push(
                    Router::with_path("{id}")
                        .put(proposals::update::handler)
                        .delete(proposals::delete::handler),
                ),
        )
        .push(
            Router::with_path("usages")
                .get(usages::index::handler)
                .post(usages::create::handler)
                .delete(usages::clear::handler)
                .push(Router::with_path("{id}").delete(usages::delete::handler)),
        )
}
