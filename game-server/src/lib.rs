use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};
use warp::Filter;
use warp::http::StatusCode;

use word_scramble_persistence::repositories::{RecordOutcome, ScoreRepository};
use word_scramble_types::{ApiError, ScoreSubmission, SubmissionReceipt, SubmissionStatus};

use crate::config::Config;
use crate::validation::validate_submission;
use crate::word_corpus::WordCorpus;

pub mod config;
pub mod validation;
pub mod word_corpus;

/// Largest accepted `POST /scores` body.
const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<u64>,
}

/// Page sizes for `GET /leaderboard`.
#[derive(Debug, Clone, Copy)]
pub struct LeaderboardLimits {
    pub default: u64,
    pub max: u64,
}

impl From<&Config> for LeaderboardLimits {
    fn from(config: &Config) -> Self {
        Self {
            default: config.default_leaderboard_limit,
            max: config.max_leaderboard_limit,
        }
    }
}

pub fn create_routes(
    score_repository: Arc<ScoreRepository>,
    word_corpus: Arc<WordCorpus>,
    limits: LeaderboardLimits,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let score_repository_filter = warp::any().map({
        let score_repository = score_repository.clone();
        move || score_repository.clone()
    });

    let word_corpus_filter = warp::any().map({
        let word_corpus = word_corpus.clone();
        move || word_corpus.clone()
    });

    let limits_filter = warp::any().map(move || limits);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Score submission endpoint
    let submit_score = warp::path("scores")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(score_repository_filter.clone())
        .and_then(handle_submit_score);

    // Leaderboard endpoint
    let leaderboard = warp::path("leaderboard")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(limits_filter)
        .and(score_repository_filter.clone())
        .and_then(handle_leaderboard_request);

    // Word source endpoint
    let words = warp::path("words")
        .and(warp::path::end())
        .and(warp::get())
        .and(word_corpus_filter)
        .map(|corpus: Arc<WordCorpus>| {
            warp::reply::with_header(
                corpus.as_text(),
                "content-type",
                "text/plain; charset=utf-8",
            )
        });

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(submit_score)
        .or(leaderboard)
        .or(words)
        .with(cors)
        .with(warp::log("word_scramble"))
}

fn json_error(message: impl Into<String>, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&ApiError::new(message)), status)
}

async fn handle_submit_score(
    submission: ScoreSubmission,
    score_repository: Arc<ScoreRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let submission = match validate_submission(&submission) {
        Ok(submission) => submission,
        Err(rejection) => {
            warn!("Rejected score {}: {}", submission.id, rejection);
            return Ok(json_error(rejection.to_string(), StatusCode::BAD_REQUEST));
        }
    };

    match score_repository.record_score(&submission).await {
        Ok(outcome) => {
            let (status, code) = match outcome {
                RecordOutcome::Recorded => (SubmissionStatus::Recorded, StatusCode::CREATED),
                RecordOutcome::Duplicate => (SubmissionStatus::Duplicate, StatusCode::OK),
            };
            Ok(warp::reply::with_status(
                warp::reply::json(&SubmissionReceipt { status }),
                code,
            ))
        }
        Err(err) => {
            error!("Failed to record score {}: {}", submission.id, err);
            Ok(json_error(
                "Failed to record score",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_leaderboard_request(
    query: LeaderboardQuery,
    limits: LeaderboardLimits,
    score_repository: Arc<ScoreRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let limit = query.limit.unwrap_or(limits.default).min(limits.max);

    match score_repository.get_leaderboard(limit).await {
        Ok(leaderboard) => Ok(warp::reply::with_status(
            warp::reply::json(&leaderboard),
            StatusCode::OK,
        )),
        Err(err) => {
            error!("Failed to fetch leaderboard: {}", err);
            Ok(json_error(
                "Failed to fetch leaderboard",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use word_scramble_types::LeaderboardEntry;

    async fn create_test_app_with_limit(
        max_stored: u64,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        // Create in-memory database for tests
        let db = word_scramble_persistence::connection::connect_to_memory_database()
            .await
            .unwrap();
        Migrator::up(&db, None).await.unwrap();
        let score_repository = Arc::new(ScoreRepository::with_max_stored(db, max_stored));
        let word_corpus = Arc::new(WordCorpus::from_text("cat\ndog\npiano\n"));

        create_routes(
            score_repository,
            word_corpus,
            LeaderboardLimits::from(&Config::default()),
        )
    }

    async fn create_test_app()
    -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        create_test_app_with_limit(1000).await
    }

    fn score_body(id: &str, name: &str, points: i32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "points": points,
            "timestamp": "2024-05-01T10:00:00+00:00",
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "OK");
    }

    #[tokio::test]
    async fn test_words_endpoint() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/words")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "cat\ndog\npiano\n");
        assert!(
            response.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
    }

    #[tokio::test]
    async fn test_submit_score_then_duplicate() {
        let app = create_test_app().await;
        let body = score_body("id-1", "Ana", 4);

        let response = warp::test::request()
            .method("POST")
            .path("/scores")
            .json(&body)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 201);
        let receipt: SubmissionReceipt = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(receipt.status, SubmissionStatus::Recorded);

        let response = warp::test::request()
            .method("POST")
            .path("/scores")
            .json(&body)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        let receipt: SubmissionReceipt = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(receipt.status, SubmissionStatus::Duplicate);
    }

    #[tokio::test]
    async fn test_invalid_submissions_rejected() {
        let app = create_test_app().await;

        for body in [
            score_body("id-1", "   ", 4),
            score_body("id-2", "Ana", -3),
            score_body("", "Ana", 1),
            serde_json::json!({
                "id": "id-3",
                "name": "Ana",
                "points": 1,
                "timestamp": "not a date",
            }),
        ] {
            let response = warp::test::request()
                .method("POST")
                .path("/scores")
                .json(&body)
                .reply(&app)
                .await;

            assert_eq!(response.status(), 400, "body {} accepted", body);
            let error: ApiError = serde_json::from_slice(response.body()).unwrap();
            assert!(!error.error.is_empty());
        }
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("POST")
            .path("/scores")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_leaderboard_sorted_and_limited() {
        let app = create_test_app().await;

        for (id, name, points) in [("1", "Ana", 2), ("2", "Bia", 9), ("3", "Caio", 5)] {
            let response = warp::test::request()
                .method("POST")
                .path("/scores")
                .json(&score_body(id, name, points))
                .reply(&app)
                .await;
            assert_eq!(response.status(), 201);
        }

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard?limit=2")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(response.body()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bia", "Caio"]);

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard")
            .reply(&app)
            .await;
        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_leaderboard() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "[]");
    }

    #[tokio::test]
    async fn test_stored_scores_bounded() {
        let app = create_test_app_with_limit(2).await;

        for (id, points) in [("1", 1), ("2", 8), ("3", 4)] {
            warp::test::request()
                .method("POST")
                .path("/scores")
                .json(&score_body(id, "Ana", points))
                .reply(&app)
                .await;
        }

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard?limit=50")
            .reply(&app)
            .await;
        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(response.body()).unwrap();
        let points: Vec<i32> = entries.iter().map(|e| e.points).collect();
        assert_eq!(points, vec![8, 4]);
    }
}
