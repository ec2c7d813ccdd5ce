use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rental_backend::{
    config::Config,
    db::{connection::create_pool, seed::seed_admin_user},
    docs::ApiDoc,
    handlers, middleware,
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_issuer = %config.jwt_issuer,
        access_token_expiration_minutes = config.access_token_expiration_minutes,
        session_expiration_days = config.session_expiration_days,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    seed_admin_user(&pool, &config).await?;

    let state = AppState::new(pool, config.clone());

    // Public routes (no auth): registration, the cookie-driven session flow,
    // and all reads.
    let public_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/places", get(handlers::places::list_places))
        .route("/api/places/{place_id}", get(handlers::places::get_place))
        .route(
            "/api/places/{place_id}/reservations",
            get(handlers::reservations::list_reservations),
        )
        .route(
            "/api/places/{place_id}/reservations/{reservation_id}",
            get(handlers::reservations::get_reservation),
        )
        .route(
            "/api/places/{place_id}/reviews",
            get(handlers::reviews::list_reviews),
        )
        .route(
            "/api/places/{place_id}/reservations/{reservation_id}/reviews",
            get(handlers::reviews::get_review),
        );

    // Mutating routes require a valid access token; role and ownership
    // decisions live in the handlers.
    let protected_routes = Router::new()
        .route("/api/places", post(handlers::places::create_place))
        .route(
            "/api/places/{place_id}",
            put(handlers::places::update_place).delete(handlers::places::delete_place),
        )
        .route(
            "/api/places/{place_id}/reservations",
            post(handlers::reservations::create_reservation),
        )
        .route(
            "/api/places/{place_id}/reservations/{reservation_id}",
            put(handlers::reservations::update_reservation)
                .delete(handlers::reservations::delete_reservation),
        )
        .route(
            "/api/places/{place_id}/reservations/{reservation_id}/reviews",
            post(handlers::reviews::create_review),
        )
        .route(
            "/api/places/{place_id}/reservations/{reservation_id}/reviews/{review_id}",
            put(handlers::reviews::update_review).delete(handlers::reviews::delete_review),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth,
        ));

    let allow_origin = if config.cors_allow_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(cors),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
