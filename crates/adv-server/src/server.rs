//! Blocking `tiny_http` trigger server.
//!
//! `tiny_http` has no async API, so the accept loop runs under
//! `spawn_blocking` and drives each batch through the runtime handle. Requests
//! are served one at a time.

use std::io::Cursor;

use anyhow::Context;
use tiny_http::{Header, Method, Response, Server};
use tokio::runtime::Handle;

use crate::bootstrap::Startup;
use crate::trigger;

#[derive(Debug, PartialEq, Eq)]
enum Route {
    Trigger,
    NotFound,
    MethodNotAllowed,
}

fn route(method: &Method, url: &str, trigger_path: &str) -> Route {
    let path = url.split('?').next().unwrap_or_default();
    if path.trim_end_matches('/') != trigger_path.trim_end_matches('/') {
        return Route::NotFound;
    }
    match method {
        Method::Get | Method::Post => Route::Trigger,
        _ => Route::MethodNotAllowed,
    }
}

fn plain_text(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_string(body).with_status_code(status);
    match Header::from_bytes("Content-Type", "text/plain; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Bind `bind_addr` and serve triggers until the listener shuts down.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn serve(startup: Startup, bind_addr: &str) -> anyhow::Result<()> {
    let server = Server::http(bind_addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {bind_addr}: {e}"))?;
    tracing::info!(
        addr = bind_addr,
        route = %startup.simulation().route,
        "trigger listening"
    );

    let runtime = Handle::current();
    tokio::task::spawn_blocking(move || serve_requests(&server, &runtime, &startup))
        .await
        .context("trigger server thread panicked")
}

/// Accept loop. Returns when `server` is unblocked or its listener fails.
fn serve_requests(server: &Server, runtime: &Handle, startup: &Startup) {
    let trigger_path = startup.simulation().route.clone();

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = match route(&method, &url, &trigger_path) {
            Route::Trigger => {
                tracing::info!(%method, %url, "simulation triggered");
                let outcome = runtime.block_on(trigger::handle(
                    &startup.config,
                    adv_sim::run_with_config,
                ));
                plain_text(outcome.status, outcome.body)
            }
            Route::NotFound => plain_text(404, "Not Found".into()),
            Route::MethodNotAllowed => {
                let response = plain_text(405, "Method Not Allowed".into());
                match Header::from_bytes("Allow", "GET, POST") {
                    Ok(header) => response.with_header(header),
                    Err(()) => response,
                }
            }
        };

        if let Err(error) = request.respond(response) {
            tracing::warn!(%error, %url, "failed to send trigger response");
        }
    }
}
