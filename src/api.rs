// 🌐 REST API - Read-only catalog endpoints plus submission intake
//
// Every handler takes one store snapshot on entry and answers from it, so a
// concurrent reload never produces a mixed response.

use crate::config::CatalogConfig;
use crate::entities::{
    FeaturedStory, Feed, FeedCard, Item, NavigationTopic, Overview, ProductSpecs, TechnicalAspect,
    TimelineEntry,
};
use crate::filter::{filter, FilterSpec};
use crate::selector::{
    find_aspect_by_id, find_item_by_id, find_navigation_topic_by_slug, find_timeline_entry_by_date,
};
use crate::slug::slugify;
use crate::store::CatalogHandle;
use crate::submission::{
    AspectDraft, ProductRequestDraft, Receipt, ReviewDraft, Submission, SubmissionSink,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogHandle,
    pub sink: Arc<dyn SubmissionSink>,
    pub config: Arc<CatalogConfig>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

fn not_found(message: impl Into<String>) -> Response {
    (StatusCode::NOT_FOUND, Json(ApiResponse::<()>::error(message))).into_response()
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    fingerprint: String,
    items: usize,
}

#[derive(Serialize)]
struct ItemsResponse {
    items: Vec<Item>,
    total: usize,
    matched: usize,
}

#[derive(Serialize)]
struct CategoryResponse {
    name: &'static str,
    slug: String,
    count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineEntrySummary {
    date: String,
    title: String,
    summary_text: String,
}

#[derive(Serialize)]
struct TimelineResponse {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    entries: Vec<TimelineEntrySummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedCardResponse {
    #[serde(flatten)]
    card: FeedCard,
    topic_slug: String,
}

#[derive(Serialize)]
struct FeedResponse {
    overview: Overview,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured: Option<FeaturedStory>,
    cards: Vec<FeedCardResponse>,
    navigation: Vec<NavigationTopic>,
}

impl From<&Feed> for FeedResponse {
    fn from(feed: &Feed) -> Self {
        Self {
            overview: feed.overview.clone(),
            featured: feed.featured.clone(),
            cards: feed
                .cards
                .iter()
                .map(|card| FeedCardResponse {
                    topic_slug: card.topic_slug(),
                    card: card.clone(),
                })
                .collect(),
            navigation: feed.navigation_topics(),
        }
    }
}

#[derive(Serialize)]
struct TopicResponse {
    name: String,
    slug: String,
    cards: Vec<FeedCard>,
}

#[derive(Serialize)]
struct ReloadResponse {
    fingerprint: String,
    items: usize,
    timeline_entries: usize,
}

/// Query string of GET /api/items
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    pub kind: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> Response {
    let store = state.catalog.snapshot();
    ok(HealthResponse {
        status: "OK",
        fingerprint: store.fingerprint().to_string(),
        items: store.item_count(),
    })
}

/// GET /api/items?kind=&category=&q= - Filtered marketplace listing
async fn list_items(State(state): State<AppState>, Query(query): Query<ItemsQuery>) -> Response {
    let store = state.catalog.snapshot();
    let spec = FilterSpec::from_tokens(
        query.kind.as_deref(),
        query.category.as_deref(),
        query.q.as_deref(),
    );
    let result = filter(&store, &spec);

    ok(ItemsResponse {
        matched: result.matched(),
        total: result.total,
        items: result.items.into_iter().cloned().collect(),
    })
}

/// GET /api/items/:id - One item
async fn get_item(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let store = state.catalog.snapshot();
    match find_item_by_id(&store, id) {
        Some(item) => ok(item),
        None => not_found(format!("No item with id {}", id)),
    }
}

/// GET /api/items/:id/specs - Product specification page
async fn get_item_specs(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let store = state.catalog.snapshot();
    let specs: Option<&ProductSpecs> = find_item_by_id(&store, id).and_then(|i| i.specs.as_ref());
    match specs {
        Some(specs) => ok(specs),
        None => not_found(format!("No specifications for item {}", id)),
    }
}

/// GET /api/categories - Category facet values with item counts
async fn list_categories(State(state): State<AppState>) -> Response {
    let store = state.catalog.snapshot();
    let categories: Vec<CategoryResponse> = store
        .category_counts()
        .into_iter()
        .map(|(category, count)| CategoryResponse {
            name: category.as_str(),
            slug: category.slug(),
            count,
        })
        .collect();
    ok(categories)
}

/// GET /api/timeline - Timeline rail
async fn get_timeline(State(state): State<AppState>) -> Response {
    let store = state.catalog.snapshot();
    let timeline = store.timeline();
    ok(TimelineResponse {
        id: timeline.id.clone(),
        title: timeline.title.clone(),
        image: timeline.image.clone(),
        entries: timeline
            .entries
            .iter()
            .map(|e| TimelineEntrySummary {
                date: e.date.clone(),
                title: e.title.clone(),
                summary_text: e.summary_text.clone(),
            })
            .collect(),
    })
}

/// GET /api/timeline/:date - One timeline entry
async fn get_timeline_entry(State(state): State<AppState>, Path(date): Path<String>) -> Response {
    let store = state.catalog.snapshot();
    let entry: Option<&TimelineEntry> = find_timeline_entry_by_date(&store, &date);
    match entry {
        Some(entry) => ok(entry),
        None => not_found(format!("No timeline entry for {}", date)),
    }
}

/// GET /api/timeline/:date/aspects/:aspect_id - One technical aspect
async fn get_aspect(
    State(state): State<AppState>,
    Path((date, aspect_id)): Path<(String, u32)>,
) -> Response {
    let store = state.catalog.snapshot();
    let aspect: Option<&TechnicalAspect> =
        find_timeline_entry_by_date(&store, &date).and_then(|e| find_aspect_by_id(e, aspect_id));
    match aspect {
        Some(aspect) => ok(aspect),
        None => not_found(format!("No aspect {} in timeline entry {}", aspect_id, date)),
    }
}

/// GET /api/feed - Home page
async fn get_feed(State(state): State<AppState>) -> Response {
    let store = state.catalog.snapshot();
    ok(FeedResponse::from(store.feed()))
}

/// GET /api/topics/:slug - Topic by slug (header menu or feed card topic)
async fn get_topic(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let store = state.catalog.snapshot();
    let cards: Vec<FeedCard> = store
        .feed()
        .cards
        .iter()
        .filter(|card| card.topic_slug() == slug)
        .cloned()
        .collect();

    let name = find_navigation_topic_by_slug(&store, &slug)
        .map(|topic| topic.name)
        .or_else(|| cards.first().map(|card| card.topic.clone()));

    match name {
        Some(name) => ok(TopicResponse {
            slug: slugify(&name),
            name,
            cards,
        }),
        None => not_found(format!("No topic {}", slug)),
    }
}

fn accept(state: &AppState, submission: Submission) -> Response {
    match state.sink.submit(submission) {
        Ok(receipt) => (StatusCode::ACCEPTED, Json(ApiResponse::<Receipt>::ok(receipt))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Submission rejected by sink");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /api/reviews - Submit a technical review
async fn submit_review(State(state): State<AppState>, Json(draft): Json<ReviewDraft>) -> Response {
    accept(&state, Submission::Review(draft))
}

/// POST /api/aspects - Propose a technical aspect
async fn submit_aspect(State(state): State<AppState>, Json(draft): Json<AspectDraft>) -> Response {
    accept(&state, Submission::Aspect(draft))
}

/// POST /api/requests - Request a product
async fn submit_request(
    State(state): State<AppState>,
    Json(draft): Json<ProductRequestDraft>,
) -> Response {
    accept(&state, Submission::ProductRequest(draft))
}

/// POST /api/reload - Rebuild the store from the configured seed
async fn reload(State(state): State<AppState>) -> Response {
    let config = state.config.clone();
    let loaded = match tokio::task::spawn_blocking(move || config.load_store()).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Reload task failed, keeping current snapshot");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Reload task failed: {}", e))),
            )
                .into_response();
        }
    };

    match loaded {
        Ok(store) => {
            let response = ReloadResponse {
                fingerprint: store.fingerprint().to_string(),
                items: store.item_count(),
                timeline_entries: store.all_timeline_entries().len(),
            };
            state.catalog.replace(store);
            ok(response)
        }
        Err(e) => {
            tracing::error!(error = %e, source = %state.config.seed_source(), "Reload failed, keeping current snapshot");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<()>::error(e.to_string())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/items", get(list_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id/specs", get(get_item_specs))
        .route("/categories", get(list_categories))
        .route("/timeline", get(get_timeline))
        .route("/timeline/:date", get(get_timeline_entry))
        .route("/timeline/:date/aspects/:aspect_id", get(get_aspect))
        .route("/feed", get(get_feed))
        .route("/topics/:slug", get(get_topic))
        .route("/reviews", post(submit_review))
        .route("/aspects", post(submit_aspect))
        .route("/requests", post(submit_request))
        .route("/reload", post(reload))
        .with_state(state.clone());

    let mut app = Router::new().nest("/api", api_routes);

    if let Some(dir) = &state.config.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
