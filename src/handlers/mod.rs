pub mod auth;
pub mod employee;
pub mod file;

use actix_web::web;
use crate::errors::AppError;

/// Undecodable JSON bodies get the same error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::post().to(auth::login)),
    )
    .service(
        web::resource("/create-employee")
            .route(web::post().to(employee::create_employee)),
    )
    .service(
        web::resource("/employees")
            .route(web::get().to(employee::get_employees)),
    )
    .service(
        web::resource("/employees/{id}")
            .route(web::get().to(employee::get_employee))
            .route(web::delete().to(employee::delete_employee)),
    )
    .service(
        web::resource("/employee/{id}")
            .route(web::get().to(employee::get_employee)),
    )
    .service(
        web::resource("/edit-employee/{id}")
            .route(web::put().to(employee::update_employee)),
    )
    .service(
        web::resource("/upload")
            .route(web::post().to(file::upload_file)),
    )
    .service(
        web::resource("/uploads/{file_name}")
            .route(web::get().to(file::serve_upload)),
    );
}
