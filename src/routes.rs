// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    handlers::{admin, attendance, auth, notification, quiz, score, vote},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Attendance endpoints at the root (paths used by the classroom pages).
/// * JSON resources under `/api`.
/// * Static pages, uploads, and a public-directory fallback.
/// * Global middleware (Trace, CORS, body limit).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let attendance_routes = Router::new()
        .route("/get-latest-qr", get(attendance::get_latest_qr))
        .route("/update-qr", post(attendance::update_qr))
        .route("/submit-attendance", post(attendance::submit_attendance))
        .route("/get-attendance-records", get(attendance::list_records));

    let quiz_routes = Router::new().route(
        "/",
        get(quiz::list_quizzes)
            .post(quiz::create_quiz)
            .put(quiz::replace_quizzes),
    );

    let score_routes = Router::new().route("/", get(score::list_scores).post(score::create_score));

    let notification_routes = Router::new()
        .route(
            "/",
            get(notification::list_notifications).post(notification::create_notification),
        )
        .route(
            "/{id}",
            put(notification::update_notification).delete(notification::delete_notification),
        );

    let login_routes = Router::new()
        .route("/teacher", post(auth::login_teacher))
        .route("/student", post(auth::login_student));

    let admin_routes = Router::new()
        .route(
            "/{collection}",
            get(admin::list_users)
                .post(admin::create_user)
                .put(admin::update_user),
        )
        .route("/{collection}/{username}", delete(admin::delete_user));

    let vote_routes = Router::new()
        .route("/create-session", post(vote::create_session))
        .route("/sessions", get(vote::list_sessions))
        .route("/add-candidate", post(vote::add_candidate))
        .route("/candidates/{session_id}", get(vote::list_candidates))
        .route(
            "/delete-candidate/{id}/{session_id}",
            delete(vote::delete_candidate),
        )
        .route("/vote", post(vote::cast_vote))
        .route("/results/{session_id}", get(vote::results));

    let pages = state.config.public_dir.join("attendance").join("public");
    let page = |name: &str| ServeFile::new(pages.join(name));

    let page_routes = Router::new()
        .route_service("/", page("student.html"))
        .route_service("/attendance", page("attendance.html"))
        .route_service("/attendance/qr-display", page("qr_display.html"))
        .route_service("/attendance/teacher", page("teacher.html"))
        .route_service("/attendance/student", page("student.html"));

    Router::new()
        .merge(attendance_routes)
        .merge(page_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/scores", score_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/login", login_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/vote", vote_routes)
        // Legacy delete paths used by the admin page
        .route("/api/students/{username}", delete(admin::delete_student))
        .route("/api/teachers/{username}", delete(admin::delete_teacher))
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        .fallback_service(ServeDir::new(&state.config.public_dir))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(state.config.body_limit)),
        )
        .with_state(state)
}
