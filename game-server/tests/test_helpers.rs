use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use warp::Filter;
use word_scramble_persistence::{connection::connect_to_memory_database, repositories::ScoreRepository};
use word_scramble_server::{
    LeaderboardLimits, config::Config, create_routes, word_corpus::WordCorpus,
};

/// Routes backed by a fresh in-memory database and a small word list.
pub async fn create_test_routes(
    words: &str,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let config = Config::default();
    let score_repository = Arc::new(ScoreRepository::with_max_stored(
        db,
        config.max_stored_scores,
    ));
    let word_corpus = Arc::new(WordCorpus::from_text(words));

    create_routes(
        score_repository,
        word_corpus,
        LeaderboardLimits::from(&config),
    )
}
