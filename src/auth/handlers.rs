use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::middleware::session_from_request;
use super::model::SessionResponse;
use crate::AppState;

/// Report whether the caller is signed in
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Session",
    responses(
        (status = 200, description = "Session status", body = SessionResponse)
    )
)]
pub async fn get_session(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = session_from_request(&req, state.identity.as_ref());
    let principal = session.principal();

    HttpResponse::Ok().json(SessionResponse {
        authenticated: session.is_authenticated(),
        uid: principal.map(|p| p.uid.clone()),
        email: principal.and_then(|p| p.email.clone()),
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/session").route(web::get().to(get_session)));
}
