use rocket::serde::Serialize;
use rocket::serde::json::Json;
use rocket::{Request, catch};

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Error {
    pub message: String,
}

fn message(text: &str) -> Json<Error> {
    Json(Error { message: text.to_string() })
}

#[catch(401)]
pub fn unauthorized(_: &Request) -> Json<Error> {
    message("Unauthorized")
}

#[catch(403)]
pub fn forbidden(_: &Request) -> Json<Error> {
    message("Forbidden")
}

#[catch(404)]
pub fn not_found(_: &Request) -> Json<Error> {
    message("Not found")
}

#[catch(409)]
pub fn conflict(_: &Request) -> Json<Error> {
    message("Conflict")
}

/// Rocket answers well-formed JSON of the wrong shape with 422.
#[catch(422)]
pub fn unprocessable_entity(_: &Request) -> Json<Error> {
    message("Unprocessable request body")
}

#[catch(429)]
pub fn too_many_requests(_: &Request) -> Json<Error> {
    message("Too many requests")
}
