use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    message: &'static str,
    username: String,
}

/// Accepts any non-empty username/password pair. No credential is checked and
/// no session is issued; the front end only uses the echoed username.
pub async fn login(req: web::Json<LoginRequest>) -> Result<HttpResponse, actix_web::Error> {
    let req = req.into_inner();
    validate_payload(&req)?;

    log::info!("Login accepted for '{}' (credentials are not verified)", req.username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        username: req.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn any_non_empty_pair_is_accepted() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "admin", "password": "whatever" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Login successful", "username": "admin" }));
    }

    #[actix_web::test]
    async fn missing_password_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "admin" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["password"], "Password is required");

        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }
}
