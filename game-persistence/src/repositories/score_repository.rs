use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::{debug, info};

use crate::entities::{prelude::*, scores};
use word_scramble_types::{LeaderboardEntry, ScoreSubmission};

/// Rows kept by default; anything ranked below is pruned after each insert.
pub const DEFAULT_MAX_STORED_SCORES: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    Duplicate,
}

pub struct ScoreRepository {
    db: DatabaseConnection,
    max_stored: u64,
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_max_stored(db, DEFAULT_MAX_STORED_SCORES)
    }

    pub fn with_max_stored(db: DatabaseConnection, max_stored: u64) -> Self {
        Self {
            db,
            max_stored: max_stored.max(1),
        }
    }

    fn model_to_entry(model: scores::Model) -> LeaderboardEntry {
        LeaderboardEntry {
            name: model.player_name,
            points: model.points,
            timestamp: model.submitted_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<LeaderboardEntry>> {
        let model = Scores::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(Self::model_to_entry))
    }

    /// Store a finished session's score. Submitting the same id twice is a
    /// no-op reported as `Duplicate`, also when both requests race.
    pub async fn record_score(&self, submission: &ScoreSubmission) -> Result<RecordOutcome> {
        // Stored in UTC so ordering on the column follows time, not offsets
        let submitted_at = chrono::DateTime::parse_from_rfc3339(&submission.timestamp)
            .with_context(|| format!("Invalid score timestamp {}", submission.timestamp))?
            .with_timezone(&Utc);

        let score_model = scores::ActiveModel {
            id: sea_orm::ActiveValue::Set(submission.id.clone()),
            player_name: sea_orm::ActiveValue::Set(submission.name.clone()),
            points: sea_orm::ActiveValue::Set(submission.points),
            submitted_at: sea_orm::ActiveValue::Set(submitted_at.into()),
            created_at: sea_orm::ActiveValue::Set(Utc::now().into()),
        };

        let inserted = Scores::insert(score_model)
            .on_conflict(
                OnConflict::column(scores::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted == 0 {
            debug!("Score {} already recorded", submission.id);
            return Ok(RecordOutcome::Duplicate);
        }

        info!(
            "Recorded {} points for {}",
            submission.points, submission.name
        );

        self.prune().await?;
        Ok(RecordOutcome::Recorded)
    }

    pub async fn get_leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let scores = Scores::find()
            .order_by_desc(scores::Column::Points)
            .order_by_asc(scores::Column::SubmittedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(scores.into_iter().map(Self::model_to_entry).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Scores::find().count(&self.db).await?)
    }

    /// Drop everything ranked below `max_stored`. Lowest points go first,
    /// and among equal points the oldest submissions go first.
    pub async fn prune(&self) -> Result<u64> {
        let ranked = Scores::find()
            .order_by_desc(scores::Column::Points)
            .order_by_desc(scores::Column::SubmittedAt)
            .all(&self.db)
            .await?;

        let stale: Vec<String> = ranked
            .into_iter()
            .skip(self.max_stored as usize)
            .map(|model| model.id)
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        let result = Scores::delete_many()
            .filter(scores::Column::Id.is_in(stale))
            .exec(&self.db)
            .await?;

        debug!("Pruned {} scores", result.rows_affected);
        Ok(result.rows_affected)
    }
}
