use actix_web::{HttpResponse, post, web};
use serde_json::json;

use crate::error::SubmitError;
use crate::handlers;
use crate::mailer::{ConfigSource, RelayFactory};

#[post("")]
async fn join(
    body: web::Bytes,
    config_source: web::Data<ConfigSource>,
    relay_factory: web::Data<RelayFactory>,
) -> Result<HttpResponse, SubmitError> {
    tracing::info!("received join request ({} bytes)", body.len());

    match process(&body, config_source.get_ref(), relay_factory.get_ref()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Your application has been submitted successfully!"
        }))),
        Err(e) => {
            tracing::error!("join request failed: {:?}", e);
            Err(e)
        }
    }
}

// Config is pulled fresh on every request; the relay is built for that config
// and dropped with the call.
async fn process(
    body: &[u8],
    config_source: &ConfigSource,
    relay_factory: &RelayFactory,
) -> Result<(), SubmitError> {
    let config = (config_source.as_ref())()?;
    let relay =
        (relay_factory.as_ref())(&config).map_err(|e| SubmitError::Unexpected(e.to_string()))?;

    handlers::join::submit(body, &config, relay.as_ref()).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(join);
}
