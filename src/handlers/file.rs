use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde::Serialize;
use crate::errors::AppError;
use crate::services::employee::EmployeeService;
use crate::utils::multipart::{field_name, read_field, read_image};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileUploadResponse {
    image_url: String,
}

/// Stores an image without attaching it to a record.
pub async fn upload_file(
    service: web::Data<EmployeeService>,
    mut payload: Multipart,
) -> Result<HttpResponse, actix_web::Error> {
    let mut image = None;

    while let Some(mut field) = payload.try_next().await.map_err(AppError::from)? {
        if field_name(&field) == "image" {
            image = read_image(&mut field, service.images().max_bytes()).await?;
        } else {
            read_field(&mut field, 0).await?;
        }
    }

    let upload = image.ok_or_else(|| AppError::invalid_field("image", "Image is required"))?;
    let path = service.save_image(upload).await?;

    Ok(HttpResponse::Ok().json(FileUploadResponse {
        image_url: format!("/{}", path),
    }))
}

pub async fn serve_upload(
    service: web::Data<EmployeeService>,
    file_name: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let stored = service
        .images()
        .read(&file_name)
        .await
        .map_err(|err| AppError::Storage(format!("failed to read image {}: {}", file_name, err)))?;

    match stored {
        Some((bytes, mime)) => Ok(HttpResponse::Ok().content_type(mime).body(bytes)),
        None => Err(AppError::NotFound("Image not found".to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::employee::tests::{multipart, service_data};
    use crate::handlers::{json_config, routes};
    use crate::utils::image_store::tests::{GIF, PNG};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn uploaded_image_is_served_back() {
        let dir = tempfile::tempdir().unwrap();
        let data = service_data(&dir).await;
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .app_data(json_config())
                .configure(routes),
        )
        .await;

        let (content_type, body) = multipart(&[("note", "profile")], Some(PNG));
        let req = test::TestRequest::post()
            .uri("/upload")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = test::read_body_json(resp).await;
        let url = json["imageUrl"].as_str().unwrap().to_string();
        assert!(url.starts_with("/uploads/"));

        let resp = test::call_service(&app, test::TestRequest::get().uri(&url).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(test::read_body(resp).await.as_ref(), PNG);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/uploads/missing.png").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn upload_rejects_non_images_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = service_data(&dir).await;
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .app_data(json_config())
                .configure(routes),
        )
        .await;

        for image in [Some(GIF), None] {
            let (content_type, body) = multipart(&[("note", "profile")], image);
            let req = test::TestRequest::post()
                .uri("/upload")
                .insert_header((header::CONTENT_TYPE, content_type))
                .set_payload(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let json: Value = test::read_body_json(resp).await;
            assert!(json["errors"]["image"].is_string());
        }
    }
}
