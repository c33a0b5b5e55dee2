//! Exposes the login configuration to request handlers.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::handler::LoginHandler;

/// Insert the handler's `Arc<LoginConfig>` into the request extensions.
pub async fn attach_login_config(
    State(handler): State<LoginHandler>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    req.extensions_mut().insert(handler.shared_config());
    next.run(req).await
}
