use ipecho::{config::Config, db, handler::function_handler};
use lambda_http::{run, service_fn, tracing, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "Unable to start"))?;
    let db = db::connect(&config).await;
    let db = db.as_ref();

    run(service_fn(|event: Request| function_handler(db, event))).await
}
