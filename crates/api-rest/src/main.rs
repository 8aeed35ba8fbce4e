//! REST API server binary.
//!
//! ## Purpose
//! Exposes the docmatch dashboard operations to the presentation host:
//! sign-in and sign-out, the symptom/location doctor filter, profile
//! expansion by stable id, aggregate statistics, the feedback log, and the
//! simulated profile email.
//!
//! ## Session gating
//! Every endpoint except `/health` and `POST /session` requires a valid
//! `x-session-token` header, mirroring the dashboard's logged-in-only pages.

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{auth, dto, HealthService};
use docmatch_core::{
    config::login_domains_from_env_value,
    constants::{DEFAULT_FEEDBACK_PATH, DEFAULT_ROSTER_PATH},
    send_profile, ChartKind, ChartSpec, CoreConfig, DoctorId, DoctorRecord, DomainAllowlist,
    FeedbackService, MailTransport, RosterError, RosterService, Session, SessionService,
    SimulatedTransport,
};
use docmatch_types::{EmailAddress, NonEmptyText};

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request
/// handlers: the immutable roster, the feedback log, the session service and
/// the mail transport.
#[derive(Clone)]
struct AppState {
    roster: Arc<RosterService>,
    feedback: Arc<FeedbackService>,
    sessions: Arc<SessionService>,
    mailer: Arc<dyn MailTransport>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        logout,
        find_doctors,
        get_doctor,
        stats_metrics,
        stats_charts,
        list_feedback,
        submit_feedback,
        email_doctor,
    ),
    components(schemas(
        dto::HealthRes,
        dto::LoginReq,
        dto::LoginRes,
        dto::LogoutRes,
        dto::DoctorRes,
        dto::FindDoctorsRes,
        dto::MetricsRes,
        dto::ChartSliceRes,
        dto::ChartRes,
        dto::ChartsRes,
        dto::FeedbackEntryRes,
        dto::ListFeedbackRes,
        dto::SubmitFeedbackReq,
        dto::SubmitFeedbackRes,
        dto::EmailDoctorReq,
        dto::EmailDoctorRes,
    ))
)]
struct ApiDoc;

/// Main entry point for the docmatch REST API server
///
/// Loads the roster once (a load failure is fatal), then serves HTTP
/// endpoints for the dashboard operations with OpenAPI/Swagger
/// documentation.
///
/// # Environment Variables
/// - `DOCMATCH_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `DOCMATCH_ROSTER_PATH`: Doctor roster CSV (default: "data/doctors.csv")
/// - `DOCMATCH_FEEDBACK_PATH`: Feedback log CSV (default: "data/feedback.csv")
/// - `DOCMATCH_LOGIN_DOMAINS`: Comma-separated sign-in domain allowlist
///   (default: "gmail.com")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the roster file is missing or malformed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("docmatch_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("DOCMATCH_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting docmatch REST API on {}", addr);

    let roster_path =
        std::env::var("DOCMATCH_ROSTER_PATH").unwrap_or_else(|_| DEFAULT_ROSTER_PATH.into());
    if !Path::new(&roster_path).is_file() {
        anyhow::bail!("Roster file does not exist: {}", roster_path);
    }
    let feedback_path =
        std::env::var("DOCMATCH_FEEDBACK_PATH").unwrap_or_else(|_| DEFAULT_FEEDBACK_PATH.into());

    let cfg = Arc::new(CoreConfig::new(
        PathBuf::from(roster_path),
        PathBuf::from(feedback_path),
    )?);

    let login_domains =
        login_domains_from_env_value(std::env::var("DOCMATCH_LOGIN_DOMAINS").ok());

    let state = AppState {
        roster: Arc::new(RosterService::load(&cfg)?),
        feedback: Arc::new(FeedbackService::new(cfg)),
        sessions: Arc::new(SessionService::new(Box::new(DomainAllowlist::new(
            login_domains,
        )))),
        mailer: Arc::new(SimulatedTransport),
    };

    // Touch the feedback log once at startup so an absent or corrupt file is
    // reported (and recovered to an empty table) before the first request.
    tracing::info!("feedback log: {} entries", state.feedback.load().len());

    let app = Router::new()
        .route("/health", get(health))
        .route("/session", post(login))
        .route("/session", delete(logout))
        .route("/doctors", get(find_doctors))
        .route("/doctors/:id", get(get_doctor))
        .route("/doctors/:id/email", post(email_doctor))
        .route("/stats/metrics", get(stats_metrics))
        .route("/stats/charts", get(stats_charts))
        .route("/feedback", get(list_feedback))
        .route("/feedback", post(submit_feedback))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = dto::HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the docmatch service. This endpoint
/// is used for monitoring and load balancer health checks; it requires no
/// session.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<dto::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/session",
    request_body = dto::LoginReq,
    responses(
        (status = 200, description = "Session opened", body = dto::LoginRes),
        (status = 400, description = "Malformed email address"),
        (status = 401, description = "Sign-in rejected")
    )
)]
/// Open a session for an email address
///
/// Presents the address to the identity provider and, on acceptance, mints a
/// session token. The token must accompany every subsequent request in the
/// `x-session-token` header.
///
/// # Errors
/// Returns `400 Bad Request` when the address fails the shape check and
/// `401 Unauthorized` when the identity provider refuses it.
#[axum::debug_handler]
async fn login(
    State(state): State<AppState>,
    Json(req): Json<dto::LoginReq>,
) -> Result<Json<dto::LoginRes>, (StatusCode, &'static str)> {
    match state.sessions.login(&req.email) {
        Ok(session) => Ok(Json(dto::LoginRes {
            token: session.token.to_string(),
            email: session.email.to_string(),
        })),
        Err(RosterError::Text(e)) => {
            tracing::error!("Login address invalid: {:?}", e);
            Err((StatusCode::BAD_REQUEST, "Invalid email address"))
        }
        Err(e) => {
            tracing::error!("Login rejected: {:?}", e);
            Err((StatusCode::UNAUTHORIZED, "Sign-in rejected"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/session",
    responses(
        (status = 200, description = "Session destroyed", body = dto::LogoutRes),
        (status = 401, description = "Missing session token")
    )
)]
/// Destroy the current session
///
/// Logging out twice is not an error; `success` reports whether a session
/// was actually removed.
#[axum::debug_handler]
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<dto::LogoutRes>, (StatusCode, &'static str)> {
    let token = auth::session_token(&headers)?;
    let success = state.sessions.logout(token);
    Ok(Json(dto::LogoutRes { success }))
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(dto::FindDoctorsParams),
    responses(
        (status = 200, description = "Matching doctors in load order", body = dto::FindDoctorsRes),
        (status = 401, description = "Missing or invalid session token")
    )
)]
/// Filter the roster by symptom and location
///
/// Both parameters are case-insensitive literal substrings; absent or empty
/// parameters match everything. The result preserves roster load order and
/// is empty, never an error, when nothing matches — the host renders the
/// "no results" notice.
#[axum::debug_handler]
async fn find_doctors(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<dto::FindDoctorsParams>,
) -> Result<Json<dto::FindDoctorsRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    let results = state.roster.find(
        params.symptom.as_deref().unwrap_or(""),
        params.location.as_deref().unwrap_or(""),
    );

    Ok(Json(dto::FindDoctorsRes {
        doctors: results.iter().map(doctor_res).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = u32, Path, description = "Stable doctor id assigned at roster load")),
    responses(
        (status = 200, description = "Full doctor profile", body = dto::DoctorRes),
        (status = 400, description = "Malformed doctor id"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Unknown doctor id")
    )
)]
/// Expand one doctor's full profile
///
/// Lookup is keyed by the stable load-position id, so expansion state held
/// by the host can never drift onto the wrong record between queries.
#[axum::debug_handler]
async fn get_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::DoctorRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    let id: DoctorId = match id.parse() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid doctor id: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid doctor id"));
        }
    };

    match state.roster.get(id) {
        Some(doctor) => Ok(Json(doctor_res(doctor))),
        None => Err((StatusCode::NOT_FOUND, "No doctor with that id")),
    }
}

#[utoipa::path(
    get,
    path = "/stats/metrics",
    responses(
        (status = 200, description = "Key dashboard metrics", body = dto::MetricsRes),
        (status = 401, description = "Missing or invalid session token")
    )
)]
/// Key metrics for the home dashboard
///
/// Total doctors plus exact distinct counts of specialties and locations,
/// recomputed from the full roster on every call.
#[axum::debug_handler]
async fn stats_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<dto::MetricsRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    let metrics = docmatch_core::key_metrics(state.roster.all());
    Ok(Json(dto::MetricsRes {
        total_doctors: metrics.total_doctors,
        distinct_specialties: metrics.distinct_specialties,
        distinct_locations: metrics.distinct_locations,
    }))
}

#[utoipa::path(
    get,
    path = "/stats/charts",
    responses(
        (status = 200, description = "Chart specifications for the host to render", body = dto::ChartsRes),
        (status = 401, description = "Missing or invalid session token")
    )
)]
/// Chart specifications over the roster
///
/// Returns the doctor-distribution-by-location histogram and the specialty
/// pie. The core only describes the charts; rendering belongs to the host.
#[axum::debug_handler]
async fn stats_charts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<dto::ChartsRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    Ok(Json(dto::ChartsRes {
        location_histogram: chart_res(docmatch_core::location_histogram(state.roster.all())),
        specialty_breakdown: chart_res(docmatch_core::specialty_breakdown(state.roster.all())),
    }))
}

#[utoipa::path(
    get,
    path = "/feedback",
    responses(
        (status = 200, description = "All feedback entries", body = dto::ListFeedbackRes),
        (status = 401, description = "Missing or invalid session token")
    )
)]
/// List the feedback log
///
/// An absent or corrupt log reads as an empty table; this endpoint never
/// fails because of the log's state.
#[axum::debug_handler]
async fn list_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<dto::ListFeedbackRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    let entries = state
        .feedback
        .load()
        .into_iter()
        .map(|entry| dto::FeedbackEntryRes {
            name: entry.name,
            comment: entry.comment,
        })
        .collect();

    Ok(Json(dto::ListFeedbackRes { entries }))
}

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = dto::SubmitFeedbackReq,
    responses(
        (status = 200, description = "Feedback appended", body = dto::SubmitFeedbackRes),
        (status = 400, description = "Name or comment missing"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "Internal server error")
    )
)]
/// Append one feedback entry
///
/// Presence checks are the only validation: name and comment must be
/// non-empty after trimming. Exactly one row is appended; prior rows are
/// never altered.
#[axum::debug_handler]
async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<dto::SubmitFeedbackReq>,
) -> Result<Json<dto::SubmitFeedbackRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    let (name, comment) = match (NonEmptyText::new(&req.name), NonEmptyText::new(&req.comment)) {
        (Ok(name), Ok(comment)) => (name, comment),
        _ => return Err((StatusCode::BAD_REQUEST, "Name and comment are required")),
    };

    match state.feedback.append(&name, &comment) {
        Ok(()) => Ok(Json(dto::SubmitFeedbackRes { success: true })),
        Err(e) => {
            tracing::error!("Append feedback error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/doctors/{id}/email",
    params(("id" = u32, Path, description = "Stable doctor id assigned at roster load")),
    request_body = dto::EmailDoctorReq,
    responses(
        (status = 200, description = "Profile sent (simulated)", body = dto::EmailDoctorRes),
        (status = 400, description = "Malformed doctor id or recipient"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Unknown doctor id"),
        (status = 500, description = "Internal server error")
    )
)]
/// Email a doctor's profile to a recipient
///
/// Delivery is simulated — no mail leaves the process. The response carries
/// the human-readable confirmation the host shows the user.
#[axum::debug_handler]
async fn email_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<dto::EmailDoctorReq>,
) -> Result<Json<dto::EmailDoctorRes>, (StatusCode, &'static str)> {
    require_session(&state, &headers)?;

    let id: DoctorId = match id.parse() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid doctor id: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid doctor id"));
        }
    };
    let doctor = match state.roster.get(id) {
        Some(doctor) => doctor,
        None => return Err((StatusCode::NOT_FOUND, "No doctor with that id")),
    };

    let recipient = match EmailAddress::parse(&req.recipient) {
        Ok(recipient) => recipient,
        Err(e) => {
            tracing::error!("Invalid recipient: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid recipient address"));
        }
    };

    match send_profile(state.mailer.as_ref(), &recipient, doctor) {
        Ok(receipt) => Ok(Json(dto::EmailDoctorRes {
            summary: receipt.summary,
        })),
        Err(e) => {
            tracing::error!("Send profile error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

// Helper functions

fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Session, (StatusCode, &'static str)> {
    let token = auth::session_token(headers)?;
    state
        .sessions
        .authenticate(token)
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired session"))
}

fn doctor_res(doctor: &DoctorRecord) -> dto::DoctorRes {
    dto::DoctorRes {
        id: doctor.id.index() as u32,
        name: doctor.name.clone(),
        specialty: doctor.specialty.clone(),
        location: doctor.location.clone(),
        symptoms: doctor.symptoms.clone(),
    }
}

fn chart_res(spec: ChartSpec) -> dto::ChartRes {
    dto::ChartRes {
        title: spec.title,
        kind: match spec.kind {
            ChartKind::Histogram => "histogram".to_string(),
            ChartKind::Pie => "pie".to_string(),
        },
        slices: spec
            .slices
            .into_iter()
            .map(|slice| dto::ChartSliceRes {
                label: slice.label,
                count: slice.count,
            })
            .collect(),
    }
}
