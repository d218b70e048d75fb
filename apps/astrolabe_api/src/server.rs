use crate::routes::{App, Reply};
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tiny_http::{Header, Request, Response, Server};

/// Accept requests forever, one tokio task per request.
///
/// `tiny_http::recv` blocks, so accepting and responding run on the blocking pool.
pub async fn serve(app: Arc<App>, bind: &str) -> anyhow::Result<()> {
    let server = Server::http(bind)
        .map_err(|e| anyhow::anyhow!("failed to bind {bind}: {e}"))?;
    let server = Arc::new(server);
    log::info!("Listening on http://{}", bind);

    loop {
        let listener = server.clone();
        let request = tokio::task::spawn_blocking(move || listener.recv())
            .await
            .context("accept task panicked")?;
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Failed to accept request: {}", e);
                continue;
            }
        };
        let app = app.clone();
        tokio::spawn(async move { handle_request(&app, request).await });
    }
}

async fn handle_request(app: &App, request: Request) {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4();
    let method = request.method().to_string();
    let url = request.url().to_string();
    log::debug!("[{}] {} {}", request_id, method, url);

    let reply = app.handle(&method, &url).await;
    let status = reply.status;
    let response = to_response(reply, &request_id.to_string());

    let sent = tokio::task::spawn_blocking(move || request.respond(response)).await;
    match sent {
        Ok(Ok(())) => log::info!(
            "[{}] {} {} -> {} in {:?}",
            request_id,
            method,
            url,
            status,
            started.elapsed()
        ),
        Ok(Err(e)) => log::warn!("[{}] failed to send response: {}", request_id, e),
        Err(e) => log::error!("[{}] respond task panicked: {}", request_id, e),
    }
}

fn to_response(reply: Reply, request_id: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_data(reply.body).with_status_code(reply.status);
    for (name, value) in [("Content-Type", reply.content_type), ("X-Request-Id", request_id)] {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => log::warn!("Skipping invalid header {}: {}", name, value),
        }
    }
    response
}
