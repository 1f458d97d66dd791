use std::sync::Arc;

use actix_web::http::header::ContentDisposition;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use parking_lot::Mutex;
use uuid::Uuid;

use super::model::{
    CreatePetitionResponse, ExportDataUriResponse, ExportQuery, PaymentResponse, PetitionForm,
    PreviewResponse,
};
use super::workflow::{GateError, Petition, Preview};
use crate::auth::{require_principal, Principal};
use crate::export::export_document;
use crate::generation::ErrorKind;
use crate::locale::format_lira;
use crate::payment::{CardDetails, PETITION_PRICE_KURUS};
use crate::{AppState, ErrorResponse};

fn authorize(req: &HttpRequest, state: &AppState) -> Result<Principal, HttpResponse> {
    require_principal(req, state.identity.as_ref()).map_err(|e| {
        HttpResponse::Unauthorized().json(ErrorResponse::new("Unauthorized", &e.to_string()))
    })
}

async fn find_petition(
    state: &AppState,
    id: Uuid,
    principal: &Principal,
) -> Result<Arc<Mutex<Petition>>, HttpResponse> {
    match state.petitions.get(&id).await {
        Some(entry) if entry.lock().owner_uid == principal.uid => Ok(entry),
        _ => Err(HttpResponse::NotFound().json(ErrorResponse::not_found("Dilekçe bulunamadı"))),
    }
}

fn gate_error(e: &GateError) -> HttpResponse {
    let body = ErrorResponse::new("Gate", &e.to_string());
    match e {
        GateError::PaymentRequired => HttpResponse::PaymentRequired().json(body),
        GateError::NotGenerated | GateError::AlreadyPaid | GateError::PaymentInProgress => {
            HttpResponse::Conflict().json(body)
        }
    }
}

/// Holds a petition's payment reservation and releases it on drop,
/// including when the request is cancelled mid-charge.
struct PaymentReservation {
    entry: Arc<Mutex<Petition>>,
    armed: bool,
}

impl PaymentReservation {
    fn begin(entry: Arc<Mutex<Petition>>) -> Result<Self, GateError> {
        entry.lock().begin_payment()?;
        Ok(Self { entry, armed: true })
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PaymentReservation {
    fn drop(&mut self) {
        if self.armed {
            self.entry.lock().abort_payment();
        }
    }
}

fn preview_response(id: Uuid, preview: Preview) -> PreviewResponse {
    PreviewResponse {
        id,
        content: preview.content,
        masked: preview.masked,
        price_kurus: PETITION_PRICE_KURUS,
        price: format_lira(PETITION_PRICE_KURUS),
    }
}

/// Create a petition from the petitioner form
#[utoipa::path(
    post,
    path = "/api/petitions",
    tag = "Petition",
    request_body = PetitionForm,
    responses(
        (status = 201, description = "Petition created", body = CreatePetitionResponse),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn create_petition(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<PetitionForm>,
) -> impl Responder {
    let principal = match authorize(&req, &state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&errors.to_message()));
    }

    let petition = Petition::new(principal.uid, form);
    let id = petition.id;
    state
        .petitions
        .insert(id, Arc::new(Mutex::new(petition)))
        .await;
    log::info!("petition {} created", id);

    HttpResponse::Created().json(CreatePetitionResponse { id })
}

/// Generate the petition text and return a masked preview
#[utoipa::path(
    post,
    path = "/api/petitions/{id}/generate",
    tag = "Petition",
    params(
        ("id" = Uuid, Path, description = "Petition ID")
    ),
    responses(
        (status = 200, description = "Generated, masked preview", body = PreviewResponse),
        (status = 409, description = "Already paid", body = ErrorResponse),
        (status = 502, description = "Generation service failed", body = ErrorResponse)
    )
)]
pub async fn generate_petition(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let principal = match authorize(&req, &state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let entry = match find_petition(&state, id, &principal).await {
        Ok(entry) => entry,
        Err(resp) => return resp,
    };

    let (subject, institution) = {
        let petition = entry.lock();
        if let Err(e) = petition.check_regenerate() {
            return gate_error(&e);
        }
        (petition.form.mesaj.clone(), petition.form.kurum.clone())
    };

    let text = match state.generation.generate(&subject, &institution).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::InvalidInput => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()));
        }
        Err(e) => {
            return HttpResponse::BadGateway()
                .json(ErrorResponse::new("GenerationFailed", &e.to_string()));
        }
    };

    let mut petition = entry.lock();
    if let Err(e) = petition.attach_content(text) {
        return gate_error(&e);
    }
    match petition.preview(&mut rand::thread_rng()) {
        Ok(preview) => HttpResponse::Ok().json(preview_response(id, preview)),
        Err(e) => gate_error(&e),
    }
}

/// Current preview: masked until paid, a fresh mask on every request
#[utoipa::path(
    get,
    path = "/api/petitions/{id}/preview",
    tag = "Petition",
    params(
        ("id" = Uuid, Path, description = "Petition ID")
    ),
    responses(
        (status = 200, description = "Preview", body = PreviewResponse),
        (status = 404, description = "Petition not found", body = ErrorResponse),
        (status = 409, description = "Not generated yet", body = ErrorResponse)
    )
)]
pub async fn get_preview(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let principal = match authorize(&req, &state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let entry = match find_petition(&state, id, &principal).await {
        Ok(entry) => entry,
        Err(resp) => return resp,
    };

    let petition = entry.lock();
    match petition.preview(&mut rand::thread_rng()) {
        Ok(preview) => HttpResponse::Ok().json(preview_response(id, preview)),
        Err(e) => gate_error(&e),
    }
}

/// Pay for full access with a test card
#[utoipa::path(
    post,
    path = "/api/petitions/{id}/payment",
    tag = "Petition",
    params(
        ("id" = Uuid, Path, description = "Petition ID")
    ),
    request_body = CardDetails,
    responses(
        (status = 200, description = "Payment accepted", body = PaymentResponse),
        (status = 402, description = "Payment declined", body = ErrorResponse),
        (status = 409, description = "Already paid or not generated", body = ErrorResponse)
    )
)]
pub async fn pay_petition(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    card: web::Json<CardDetails>,
) -> impl Responder {
    let principal = match authorize(&req, &state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let entry = match find_petition(&state, id, &principal).await {
        Ok(entry) => entry,
        Err(resp) => return resp,
    };

    let reservation = match PaymentReservation::begin(entry.clone()) {
        Ok(reservation) => reservation,
        Err(e) => return gate_error(&e),
    };

    let receipt = match state.payments.charge(&card, PETITION_PRICE_KURUS).await {
        Ok(receipt) => receipt,
        Err(e) => {
            return HttpResponse::PaymentRequired()
                .json(ErrorResponse::new("PaymentFailed", &e.to_string()));
        }
    };

    let paid = entry.lock().mark_paid(receipt.clone());
    if let Err(e) = paid {
        return gate_error(&e);
    }
    reservation.disarm();
    log::info!("petition {} unlocked by payment {}", id, receipt.transaction_id);

    HttpResponse::Ok().json(PaymentResponse {
        message: "Ödeme başarılı! Şimdi tam metni görüntüleyebilir ve indirebilirsiniz."
            .to_string(),
        receipt,
    })
}

/// Download the full petition as Word or PDF
#[utoipa::path(
    get,
    path = "/api/petitions/{id}/export",
    tag = "Petition",
    params(
        ("id" = Uuid, Path, description = "Petition ID"),
        ("format" = Option<String>, Query, description = "docx (default) or pdf"),
        ("data_uri" = Option<bool>, Query, description = "Return JSON with a data URI instead of a file")
    ),
    responses(
        (status = 200, description = "Document file, or JSON when data_uri=true", body = ExportDataUriResponse),
        (status = 402, description = "Payment required", body = ErrorResponse),
        (status = 500, description = "Export failed", body = ErrorResponse)
    )
)]
pub async fn export_petition(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    let principal = match authorize(&req, &state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let entry = match find_petition(&state, id, &principal).await {
        Ok(entry) => entry,
        Err(resp) => return resp,
    };

    let (text, fields) = {
        let petition = entry.lock();
        match petition.final_text() {
            Ok(text) => (text.to_string(), petition.form.petitioner_fields()),
            Err(e) => return gate_error(&e),
        }
    };

    let builder = state.builder_for(query.format);
    let result = web::block(move || export_document(&text, &fields, builder.as_ref())).await;

    match result {
        Ok(Ok(artifact)) if query.data_uri => HttpResponse::Ok().json(ExportDataUriResponse {
            data_uri: artifact.to_data_uri(),
            file_name: artifact.file_name,
            mime_type: artifact.mime_type.to_string(),
        }),
        Ok(Ok(artifact)) => HttpResponse::Ok()
            .content_type(artifact.mime_type)
            .insert_header(ContentDisposition::attachment(artifact.file_name))
            .body(artifact.bytes),
        Ok(Err(e)) => HttpResponse::InternalServerError()
            .json(ErrorResponse::new("ExportFailed", &e.to_string())),
        Err(e) => {
            log::error!("export task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Belge oluşturulamadı"))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/petitions").route(web::post().to(create_petition)))
        .service(
            web::resource("/petitions/{id}/generate").route(web::post().to(generate_petition)),
        )
        .service(web::resource("/petitions/{id}/preview").route(web::get().to(get_preview)))
        .service(web::resource("/petitions/{id}/payment").route(web::post().to(pay_petition)))
        .service(web::resource("/petitions/{id}/export").route(web::get().to(export_petition)));
}
