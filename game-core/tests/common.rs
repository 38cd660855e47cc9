#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use word_scramble_core::{
    EngineConfig, FixedTier, GameEvent, GameEventHandler, ProgressionPolicy, ProgressiveLength,
    RoundEngine, WordPool,
};
use word_scramble_types::{GamePhase, ScoreSubmission};

pub type TestEngine = RoundEngine<StdRng>;

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }

    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                GameEvent::ScoreReady { submission } => Some(submission.clone()),
                _ => None,
            })
            .collect()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn test_config(round_seconds: u32, skip_budget: u32) -> EngineConfig {
    EngineConfig {
        round_seconds,
        skip_budget,
    }
}

/// Creates an engine with an attached collector, still in the Loading phase
pub fn create_engine(
    policy: Box<dyn ProgressionPolicy>,
    config: EngineConfig,
) -> (TestEngine, EventCollector) {
    let mut engine = RoundEngine::with_rng(config, policy, "Tester", StdRng::seed_from_u64(17));
    let collector = EventCollector::new();
    engine.event_bus.add_handler(Box::new(collector.clone()));
    (engine, collector)
}

/// Progressive-length engine over a small corpus, words already loaded
pub fn create_corpus_engine(words: &[&str], start_length: usize) -> (TestEngine, EventCollector) {
    let policy = Box::new(ProgressiveLength::new(start_length, 8));
    let (mut engine, collector) = create_engine(policy, EngineConfig::default());
    engine.load_words(WordPool::single(words.iter().map(|w| w.to_string()).collect()));
    (engine, collector)
}

/// Fixed-tier engine over the built-in lists, words already loaded
pub fn create_fixed_engine(config: EngineConfig) -> (TestEngine, EventCollector) {
    let (mut engine, collector) = create_engine(Box::new(FixedTier::new()), config);
    engine.load_words(FixedTier::default_pool());
    (engine, collector)
}

/// The word behind the current round
pub fn current_word(engine: &TestEngine) -> String {
    engine
        .round()
        .map(|round| round.original.clone())
        .expect("no active round")
}

pub fn current_token(engine: &TestEngine) -> u64 {
    engine.current_token().expect("no active round")
}

/// Tick the current round down to zero
pub fn run_out_clock(engine: &mut TestEngine) {
    let token = current_token(engine);
    for _ in 0..engine.config().round_seconds {
        engine.tick(token);
    }
}

pub fn assert_phase(engine: &TestEngine, expected: GamePhase) {
    assert_eq!(
        engine.phase(),
        expected,
        "Expected phase {:?}, got {:?}",
        expected,
        engine.phase()
    );
}
