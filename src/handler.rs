use lambda_http::{
    http::{header::CONTENT_TYPE, StatusCode},
    request::RequestContext,
    tracing, Body, Error, Request, RequestExt, Response,
};

use crate::db::{Database, StoredItem};

pub const UNKNOWN_SOURCE_IP: &str = "unknown";

const STORE_FAILED: &str = "Failed to store data in DynamoDB\n";
const RETRIEVE_FAILED: &str = "Failed to retrieve data from DynamoDB\n";

/// Caller address as reported by the gateway identity context.
///
/// ALB events carry no identity, so they fall through to `unknown` along
/// with requests that have no context at all.
pub fn source_ip(event: &Request) -> String {
    let reported = match event.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(ctx)) => ctx.identity.source_ip.as_deref(),
        Some(RequestContext::ApiGatewayV2(ctx)) => ctx.http.source_ip.as_deref(),
        Some(RequestContext::WebSocket(ctx)) => ctx.identity.source_ip.as_deref(),
        _ => None,
    };

    match reported {
        Some(ip) if !ip.is_empty() => ip.to_string(),
        _ => UNKNOWN_SOURCE_IP.to_string(),
    }
}

pub fn render_records(records: &[StoredItem]) -> String {
    let rendered: Vec<String> = records.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

fn text_response(status: StatusCode, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::Text(body))?)
}

/// Record the caller's address and echo back everything stored so far.
///
/// Store failures end the invocation with a 500 and a fixed message; the
/// underlying error only goes to the log.
pub async fn function_handler(db: &dyn Database, event: Request) -> Result<Response<Body>, Error> {
    let source_ip = source_ip(&event);
    tracing::debug!(%source_ip, "Handling invocation");

    if let Err(e) = db.put_source_ip(&source_ip).await {
        tracing::error!(backend = db.backend(), error = %e, "Failed to put item");
        return text_response(StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILED.to_string());
    }

    let records = match db.scan_source_ips().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(backend = db.backend(), error = %e, "Failed to scan items");
            return text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                RETRIEVE_FAILED.to_string(),
            );
        }
    };

    text_response(
        StatusCode::OK,
        format!(
            "Hello, {source_ip}!\nStored data: {}\n",
            render_records(&records)
        ),
    )
}
