#![allow(dead_code)]

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use word_scramble_client::{
    ClientError, DriverOptions, Flow, GameDriver, ProfileStore, ScoreError, ScoreService,
    WordSource,
};
use word_scramble_core::{EngineConfig, ProgressionPolicy, ProgressiveLength, RoundEngine, WordPool};
use word_scramble_types::{LeaderboardEntry, ScoreSubmission, SubmissionStatus};

/// Output sink the test can read while the driver still owns a clone.
#[derive(Clone, Default)]
pub struct SharedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Score service that keeps submissions in memory. Can be told to fail.
#[derive(Default)]
pub struct FakeScoreService {
    submissions: Mutex<Vec<ScoreSubmission>>,
    failing: bool,
}

impl FakeScoreService {
    pub fn failing() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoreService for FakeScoreService {
    async fn submit_score(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<SubmissionStatus, ScoreError> {
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(submission.clone());
        if self.failing {
            return Err(ScoreError::Status {
                status: 503,
                message: "down for maintenance".to_string(),
            });
        }
        Ok(SubmissionStatus::Recorded)
    }

    async fn leaderboard(&self, _limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreError> {
        if self.failing {
            return Err(ScoreError::Status {
                status: 503,
                message: "down for maintenance".to_string(),
            });
        }
        // Oldest first; the driver does the ranking
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .map(LeaderboardEntry::from)
            .collect())
    }
}

pub struct StaticWords(pub WordPool);

#[async_trait]
impl WordSource for StaticWords {
    async fn fetch_words(&self) -> Result<WordPool, ClientError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static words".to_string()
    }
}

pub struct UnavailableWords;

#[async_trait]
impl WordSource for UnavailableWords {
    async fn fetch_words(&self) -> Result<WordPool, ClientError> {
        Err(ClientError::Status(503))
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

pub fn words(list: &[&str]) -> Arc<dyn WordSource> {
    Arc::new(StaticWords(WordPool::single(
        list.iter().map(|w| w.to_string()).collect(),
    )))
}

pub fn corpus_policy(start_length: usize) -> Box<dyn ProgressionPolicy> {
    Box::new(ProgressiveLength::new(start_length, 8).removing_used_words())
}

pub struct Harness {
    pub driver: GameDriver<SharedOutput>,
    pub output: SharedOutput,
    pub lines_tx: mpsc::Sender<String>,
    pub lines: mpsc::Receiver<String>,
    pub scores: Arc<FakeScoreService>,
}

pub struct HarnessBuilder {
    config: EngineConfig,
    policy: Box<dyn ProgressionPolicy>,
    word_source: Arc<dyn WordSource>,
    scores: Arc<FakeScoreService>,
    profile: ProfileStore,
}

impl HarnessBuilder {
    pub fn new(word_source: Arc<dyn WordSource>) -> Self {
        let mut profile = ProfileStore::in_memory();
        profile.set_player_name("Tester").unwrap();

        Self {
            config: EngineConfig::default(),
            policy: corpus_policy(3),
            word_source,
            scores: Arc::new(FakeScoreService::default()),
            profile,
        }
    }

    pub fn config(mut self, round_seconds: u32, skip_budget: u32) -> Self {
        self.config = EngineConfig {
            round_seconds,
            skip_budget,
        };
        self
    }

    pub fn policy(mut self, policy: Box<dyn ProgressionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn scores(mut self, scores: FakeScoreService) -> Self {
        self.scores = Arc::new(scores);
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.profile = ProfileStore::in_memory();
        self
    }

    pub fn build(self) -> Harness {
        let engine = RoundEngine::with_rng(self.config, self.policy, "", StdRng::seed_from_u64(11));
        let output = SharedOutput::default();
        let options = DriverOptions {
            leaderboard_size: 10,
            fetch_attempts: 2,
            retry_delay: Duration::from_millis(10),
        };
        let driver = GameDriver::new(
            engine,
            self.word_source,
            self.scores.clone(),
            self.profile,
            options,
            output.clone(),
        );
        let (lines_tx, lines) = mpsc::channel(16);

        Harness {
            driver,
            output,
            lines_tx,
            lines,
            scores: self.scores,
        }
    }
}

impl Harness {
    /// Greet and wait for the word list to arrive.
    pub async fn start(&mut self) {
        self.driver.start().unwrap();
        self.step().await;
    }

    pub async fn step(&mut self) -> Flow {
        self.driver.step(&mut self.lines).await.unwrap()
    }

    pub async fn send(&mut self, line: &str) -> Flow {
        self.lines_tx.send(line.to_string()).await.unwrap();
        self.step().await
    }

    pub fn current_word(&self) -> String {
        self.driver.engine().round().unwrap().original.clone()
    }

    pub async fn step_until(&mut self, done: impl Fn(&GameDriver<SharedOutput>) -> bool) {
        for _ in 0..200 {
            if done(&self.driver) {
                return;
            }
            self.step().await;
        }
        panic!("condition not reached; output:\n{}", self.output.text());
    }
}
