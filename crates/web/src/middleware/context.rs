use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use category_storage::RequestContext;

/// Gives each request its own [`RequestContext`] with a deadline of
/// `timeout` from arrival. The context is cancelled once the request
/// future completes or is dropped, e.g. when the client disconnects.
pub async fn attach_request_context(
    State(timeout): State<Duration>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::with_timeout(timeout);
    let _cancel_on_drop = ctx.cancellation_token().clone().drop_guard();

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
