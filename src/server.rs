use crate::attendance::{AttendancePolicy, attending_students};
use crate::colors::department_colors;
use crate::config::ServerConfig;
use crate::data::{
    Arrangement, ArrangementRequest, ArrangementResponse, HealthStatus, RosterUploaded,
    ServiceLimits,
};
use crate::error::{ApiError, ExportError};
use crate::export;
use crate::roster::{generate_sample_roster, parse_roster_bytes, write_roster};
use crate::seating::SeatingAssigner;
use crate::seatmap::generate_seat_maps;
use crate::store::BoundedStore;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use itertools::Itertools;
use log::info;
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct AppState {
    uploads: Mutex<BoundedStore<Bytes>>,
    arrangements: Mutex<BoundedStore<Arrangement>>,
    policy: AttendancePolicy,
    config: ServerConfig,
}

type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            uploads: Mutex::new(BoundedStore::new(config.max_uploads)),
            arrangements: Mutex::new(BoundedStore::new(config.max_arrangements)),
            policy: AttendancePolicy::default(),
            config: config.clone(),
        }
    }

    fn uploads(&self) -> MutexGuard<'_, BoundedStore<Bytes>> {
        self.uploads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn arrangements(&self) -> MutexGuard<'_, BoundedStore<Arrangement>> {
        self.arrangements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn at_most(name: &str, value: usize, limit: usize) -> Result<(), ApiError> {
    if value > limit {
        return Err(ApiError::BadRequest(format!("{} must be at most {}", name, limit)));
    }
    Ok(())
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthStatus> {
    let config = &state.config;
    Json(HealthStatus {
        status: "ok",
        message: "Seating planner is running",
        version: env!("CARGO_PKG_VERSION"),
        prediction_type: "rule-based",
        config: ServiceLimits {
            max_upload_bytes: config.max_upload_bytes,
            max_uploads: config.max_uploads,
            max_arrangements: config.max_arrangements,
            max_rooms: config.max_rooms,
            max_seats_per_room: config.max_seats_per_room,
            max_sample_count: config.max_sample_count,
        },
    })
}

async fn upload_roster_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RosterUploaded>), ApiError> {
    let records = parse_roster_bytes(&body)?;
    let file_id = state.uploads().insert(body);
    info!("Stored roster {} with {} rows", file_id, records.len());
    Ok((
        StatusCode::CREATED,
        Json(RosterUploaded {
            file_id,
            rows: records.len(),
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct SampleQuery {
    count: Option<usize>,
}

async fn sample_roster_handler(
    State(state): State<SharedState>,
    Query(query): Query<SampleQuery>,
) -> Result<(StatusCode, Json<RosterUploaded>), ApiError> {
    let count = query.count.unwrap_or(100);
    if count == 0 {
        return Err(ApiError::BadRequest(
            "Sample roster needs at least one student".to_string(),
        ));
    }
    at_most("count", count, state.config.max_sample_count)?;
    let records = generate_sample_roster(count, &mut rand::thread_rng());
    let csv = write_roster(&records).map_err(ExportError::from)?;
    let file_id = state.uploads().insert(Bytes::from(csv));
    info!("Generated sample roster {} with {} rows", file_id, count);
    Ok((
        StatusCode::CREATED,
        Json(RosterUploaded {
            file_id,
            rows: count,
        }),
    ))
}

async fn arrange_handler(
    State(state): State<SharedState>,
    Json(request): Json<ArrangementRequest>,
) -> Result<Json<ArrangementResponse>, ApiError> {
    if request.num_rooms < 1 || request.seats_per_room < 1 {
        return Err(ApiError::BadRequest("Invalid room configuration".to_string()));
    }
    at_most("numRooms", request.num_rooms, state.config.max_rooms)?;
    at_most(
        "seatsPerRoom",
        request.seats_per_room,
        state.config.max_seats_per_room,
    )?;
    let upload = state
        .uploads()
        .get(&request.file_id)
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("Invalid file ID".to_string()))?;

    let records = parse_roster_bytes(&upload)?;
    let predictions = state.policy.predict(&records);
    let attending = attending_students(&predictions);

    let assigner = SeatingAssigner::new(request.num_rooms, request.seats_per_room)
        .with_department_buffer(request.department_buffer);
    assigner.validate_capacity(attending.len())?;

    let seed = request.seed.unwrap_or_else(rand::random);
    info!("Arranging roster {} with seed {}", request.file_id, seed);
    let rooms = assigner.arrange_seeded(&attending, seed)?;

    let departments: Vec<String> = records
        .iter()
        .map(|r| r.department.clone())
        .unique()
        .collect();
    let arrangement = Arrangement {
        total_students: records.len(),
        attending_count: attending.len(),
        num_rooms: request.num_rooms,
        seats_per_room: request.seats_per_room,
        seed,
        seat_maps: generate_seat_maps(&rooms, request.seats_per_row),
        rooms,
        department_colors: department_colors(&departments),
        departments,
        attendance_probabilities: predictions
            .iter()
            .map(|p| p.attendance_probability)
            .collect(),
    };

    let arrangement_id = state.arrangements().insert(arrangement.clone());
    state.uploads().remove(&request.file_id);

    Ok(Json(ArrangementResponse {
        arrangement_id,
        arrangement,
    }))
}

fn find_arrangement(state: &AppState, id: &str) -> Result<Arrangement, ApiError> {
    state.arrangements().get(id).cloned().ok_or_else(|| {
        ApiError::NotFound(
            "No seating data available. Please generate the arrangement first.".to_string(),
        )
    })
}

fn attachment(bytes: Vec<u8>, content_type: &str, extension: &str) -> Response {
    let filename = export::download_name(extension, chrono::Local::now());
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn download_csv_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let arrangement = find_arrangement(&state, &id)?;
    let csv = export::to_csv(&arrangement.rooms)?;
    Ok(attachment(csv, "text/csv", "csv"))
}

async fn download_pdf_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let arrangement = find_arrangement(&state, &id)?;
    let pdf = export::to_pdf(&arrangement.rooms);
    Ok(attachment(pdf, "application/pdf", "pdf"))
}

async fn clear_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.arrangements().remove(&id) {
        Some(_) => {
            info!("Cleared arrangement {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::NotFound(format!("Unknown arrangement {}", id))),
    }
}

async fn add_security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    response
}

pub fn router(config: &ServerConfig) -> Router {
    let state: SharedState = Arc::new(AppState::new(config));
    Router::new()
        .route("/v1/health", get(health_handler))
        .route(
            "/v1/roster",
            post(upload_roster_handler).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/v1/roster/sample", post(sample_roster_handler))
        .route("/v1/seating/arrange", post(arrange_handler))
        .route("/v1/seating/:id", delete(clear_handler))
        .route("/v1/seating/:id/csv", get(download_csv_handler))
        .route("/v1/seating/:id/pdf", get(download_pdf_handler))
        .layer(middleware::map_response(add_security_headers))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
