use actix_web::{web, HttpResponse, Responder};
use rusoto_credential::AwsCredentials;
use serde::{Deserialize, Serialize};

use crate::cloud_provider::{launch_instance, Ec2Provider, LaunchCloudInstance};
use crate::command::{parse_command, LaunchParams};
use crate::util::LaunchResult;

pub const MISSING_PARAMS_ERROR: &str = "Missing one or more required parameters in command";

// -----------------------------------------------------------------------------
// DTOs
// -----------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct LaunchCommand {
    pub command: Option<String>,
}

// -----------------------------------------------------------------------------
// Handlers
// -----------------------------------------------------------------------------

/// Run one launch command end to end: parse, validate, launch, normalize.
/// Every failure path folds into the uniform `LaunchResult` shape.
pub async fn run_launch_command(
    credentials: &AwsCredentials,
    command: Option<&str>,
) -> LaunchResult {
    let params = parse_command(command);

    let launch_params = match LaunchParams::from_params(&params) {
        Some(launch_params) => launch_params,
        None => return LaunchResult::failure(MISSING_PARAMS_ERROR.to_string()),
    };

    let provider = match Ec2Provider::new(credentials.clone(), &launch_params.region) {
        Ok(provider) => provider,
        Err(err) => return LaunchResult::failure(err.to_string()),
    };

    let launch = LaunchCloudInstance {
        instance_type: launch_params.instance_type,
        image_id: launch_params.image_id,
        instance_name: launch_params.instance_name,
    };

    match launch_instance(&provider, &launch).await {
        Ok(instance) => LaunchResult::ok(instance.id),
        Err(err) => {
            log::error!("Failed to launch instance: {}", err);
            LaunchResult::failure(err.to_string())
        }
    }
}

async fn launch_form_handler(
    credentials: web::Data<AwsCredentials>,
    form: web::Form<LaunchCommand>,
) -> impl Responder {
    let result = run_launch_command(&credentials, form.command.as_deref()).await;
    HttpResponse::Ok().json(result)
}

async fn launch_query_handler(
    credentials: web::Data<AwsCredentials>,
    query: web::Query<LaunchCommand>,
) -> impl Responder {
    let result = run_launch_command(&credentials, query.command.as_deref()).await;
    HttpResponse::Ok().json(result)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/launch")
            .route(web::post().to(launch_form_handler))
            .route(web::get().to(launch_query_handler)),
    );
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
