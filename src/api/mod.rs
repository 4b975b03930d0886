use std::sync::{Arc, Weak};

use anyhow::Result;
use hyper::header;
use hyper::server::conn::Http;
use hyper::{Body, Request, Response, StatusCode};
use routerify::ext::RequestExt;
use routerify::{RequestServiceBuilder, Router};
use serde_json::json;
use tokio::net::TcpSocket;
use tokio::select;

use self::macros::json_response;
use crate::global::GlobalState;

mod contact;
mod error;
mod health;
mod index;
mod macros;
mod page;
mod statics;

pub use contact::ACCEPTED_NOT_FORWARDED;
pub use error::{RouteError, ShouldLog};

pub(crate) trait RequestGlobalExt {
    fn get_global(&self) -> error::Result<Arc<GlobalState>>;
}

impl RequestGlobalExt for Request<Body> {
    fn get_global(&self) -> error::Result<Arc<GlobalState>> {
        self.data::<Weak<GlobalState>>()
            .expect("global state not set")
            .upgrade()
            .ok_or_else(|| {
                RouteError::from((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to upgrade global state",
                ))
            })
    }
}

/// The machine flow is selected by `X-Requested-With: fetch` (the form's own
/// script) or an `Accept` header asking for JSON; everything else is treated
/// as a browser.
fn wants_json(req: &Request<Body>) -> bool {
    let fetch = req
        .headers()
        .get("X-Requested-With")
        .and_then(|value| value.to_str().ok())
        == Some("fetch");

    fetch
        || req
            .headers()
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map(|accept| accept.contains("application/json"))
            .unwrap_or(false)
}

async fn not_found(_: Request<Body>) -> error::Result<Response<Body>> {
    Ok(json_response!(
        StatusCode::NOT_FOUND,
        json!({ "ok": false, "message": "Not Found" })
    ))
}

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError> {
    let weak = Arc::downgrade(global);
    Router::builder()
        .data(weak)
        .err_handler_with_info(error::error_handler)
        .get("/", index::handle)
        .get("/health", health::handle)
        .post("/contact", contact::handle)
        .get("/img/:file", statics::handle)
        .any(not_found)
        .build()
        .expect("failed to build router")
}

pub async fn run(global: Arc<GlobalState>) -> Result<()> {
    let bind_address = global.config.bind_address;

    tracing::info!("listening on {}", bind_address);
    let socket = if bind_address.is_ipv6() {
        TcpSocket::new_v6()?
    } else {
        TcpSocket::new_v4()?
    };

    socket.set_reuseaddr(true)?;
    socket.set_reuseport(true)?;
    socket.bind(bind_address)?;
    let listener = socket.listen(1024)?;

    // The router holds a Weak reference to the global state so that open
    // keep-alive connections cannot keep the global alive once shutdown has
    // started; when the upgrade fails the request is refused instead.
    let request_service =
        RequestServiceBuilder::new(routes(&global)).expect("failed to build request service");

    loop {
        select! {
            _ = global.ctx.done() => {
                return Ok(());
            },
            r = listener.accept() => {
                let (socket, addr) = r?;

                let service = request_service.build(addr);

                tracing::debug!("accepted connection from {}", addr);

                tokio::spawn(async move {
                    Http::new().serve_connection(socket, service).await.ok();
                });
            },
        }
    }
}
