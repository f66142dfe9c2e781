use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use serde_json::json;
use crate::errors::AppError;
use crate::models::employee::EmployeeForm;
use crate::services::employee::{EmployeeService, ImageUpload};
use crate::utils::multipart::{field_name, parse_course, read_image, read_text};
use crate::utils::search::search;

#[derive(Deserialize)]
pub struct EmployeeQueryParams {
    search: Option<String>,
}

/// Decodes the create/edit form. `course` may repeat; every occurrence is merged.
async fn read_submission(
    mut payload: Multipart,
    image_limit: usize,
) -> Result<(EmployeeForm, Option<ImageUpload>), AppError> {
    let mut form = EmployeeForm::default();
    let mut image = None;

    while let Some(mut field) = payload.try_next().await? {
        let name = field_name(&field);

        // Size and type are checked later with the other fields
        if name == "image" {
            image = read_image(&mut field, image_limit).await?;
            continue;
        }

        // Everything else is a text field
        let value = read_text(&mut field, &name).await?;
        match name.as_str() {
            "name" => form.name = value,
            "email" => form.email = value,
            "mobileNo" => form.mobile_no = value,
            "designation" => form.designation = value,
            "gender" => form.gender = value,
            "course" | "course[]" => form.course.extend(parse_course(&value)),
            other => log::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok((form, image))
}

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: Multipart,
) -> Result<HttpResponse, actix_web::Error> {
    let (form, image) = read_submission(payload, service.images().max_bytes()).await?;
    let employee = service.create(form, image).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Employee created successfully",
        "employee": employee,
    })))
}

pub async fn get_employees(
    service: web::Data<EmployeeService>,
    query: web::Query<EmployeeQueryParams>,
) -> Result<HttpResponse, actix_web::Error> {
    let employees = service.list().await?;

    match query.search.as_deref() {
        Some(term) => Ok(HttpResponse::Ok().json(search(term, &employees))),
        None => Ok(HttpResponse::Ok().json(employees)),
    }
}

pub async fn get_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = service.get(&id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, actix_web::Error> {
    let (form, image) = read_submission(payload, service.images().max_bytes()).await?;
    let employee = service.update(&id, form, image).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully",
        "employee": employee,
    })))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    service.delete(&id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
    })))
}
