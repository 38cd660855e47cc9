use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};
use word_scramble_types::{GamePhase, RoundToken, RoundView};

use crate::{
    GameEvent, GameEventBus, POINTS_PER_WORD, ProgressionPolicy, Round, SubmissionLatch, WordPool,
    build_submission, is_correct_guess,
};

pub const FINISHED_MESSAGE: &str = "Game over! Congratulations!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub round_seconds: u32,
    pub skip_budget: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_seconds: 30,
            skip_budget: 3,
        }
    }
}

/// Everything that lives for one game, from first word to game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player_name: String,
    pub points: u32,
    pub skips_remaining: u32,
    pub words_solved: u32,
}

impl Session {
    fn new(player_name: String, skip_budget: u32) -> Self {
        Self {
            player_name,
            points: 0,
            skips_remaining: skip_budget,
            words_solved: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipOutcome {
    Skipped,
    /// The pending guess was right, so it was scored and no skip was spent.
    AnsweredCorrectly,
    NoBudget,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counted { remaining_seconds: u32 },
    TimedOut,
    Stale,
}

/// Drives one player's session: draws words, runs the round state machine,
/// keeps score and makes sure the final score is reported once.
///
/// The engine never sleeps. Whoever owns it delivers one `tick` per elapsed
/// second, tagged with the token of the round it was started for.
pub struct RoundEngine<R: RngCore = StdRng> {
    config: EngineConfig,
    policy: Box<dyn ProgressionPolicy>,
    rng: R,
    loaded_pool: Option<WordPool>, // Untouched copy, restored on restart
    pool: WordPool,
    session: Session,
    round: Option<Round>,
    phase: GamePhase,
    last_token: RoundToken,
    difficulty: String,
    latch: SubmissionLatch,
    status_message: Option<String>,
    pub event_bus: GameEventBus,
}

impl RoundEngine<StdRng> {
    pub fn new(config: EngineConfig, policy: Box<dyn ProgressionPolicy>, player_name: &str) -> Self {
        Self::with_rng(config, policy, player_name, StdRng::from_os_rng())
    }
}

impl<R: RngCore> RoundEngine<R> {
    pub fn with_rng(
        config: EngineConfig,
        policy: Box<dyn ProgressionPolicy>,
        player_name: &str,
        rng: R,
    ) -> Self {
        let config = EngineConfig {
            round_seconds: config.round_seconds.max(1),
            ..config
        };
        let difficulty = policy.difficulty_label();

        Self {
            config,
            policy,
            rng,
            loaded_pool: None,
            pool: WordPool::default(),
            session: Session::new(player_name.to_string(), config.skip_budget),
            round: None,
            phase: GamePhase::Loading,
            last_token: 0,
            difficulty,
            latch: SubmissionLatch::new(),
            status_message: None,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Token of the round currently being played, if any.
    pub fn current_token(&self) -> Option<RoundToken> {
        self.round
            .as_ref()
            .filter(|_| self.phase == GamePhase::Active)
            .map(|round| round.token)
    }

    pub fn difficulty_label(&self) -> String {
        self.policy.difficulty_label()
    }

    pub fn is_exhausted(&self) -> bool {
        self.policy.is_exhausted(&self.pool)
    }

    pub fn submission_claimed(&self) -> bool {
        self.latch.is_claimed()
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.session.player_name = name.to_string();
    }

    /// Hand the engine its word pool. Only the first load counts; later calls
    /// are ignored so a slow duplicate fetch cannot reset a game in progress.
    pub fn load_words(&mut self, pool: WordPool) -> bool {
        if self.phase != GamePhase::Loading {
            warn!("Ignoring word pool delivered after loading finished");
            return false;
        }

        info!("Loaded {} words", pool.len());
        self.event_bus.publish(GameEvent::WordsLoaded {
            word_count: pool.len(),
        });
        self.loaded_pool = Some(pool.clone());
        self.pool = pool;
        self.begin_round();
        true
    }

    /// Update the pending guess. Rejected when no round accepts input.
    pub fn set_guess(&mut self, guess: &str) -> bool {
        if self.phase != GamePhase::Active {
            return false;
        }
        match self.round.as_mut() {
            Some(round) if round.is_accepting_input() => {
                round.guess = guess.to_string();
                true
            }
            _ => false,
        }
    }

    /// Compare the pending guess with the word. A correct answer scores and
    /// moves straight on to the next round.
    pub fn check_guess(&mut self) -> GuessOutcome {
        if self.phase != GamePhase::Active {
            return GuessOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return GuessOutcome::Ignored;
        };
        if !round.is_accepting_input() {
            return GuessOutcome::Ignored;
        }

        if !is_correct_guess(&round.guess, &round.original) {
            round.mark_incorrect();
            let guess = round.guess.clone();
            debug!("Guess {:?} rejected", guess);
            self.event_bus.publish(GameEvent::GuessRejected { guess });
            return GuessOutcome::Incorrect;
        }

        round.mark_correct();
        let word = round.original.clone();
        self.session.points += POINTS_PER_WORD;
        self.session.words_solved += 1;
        self.policy.advance();
        self.phase = GamePhase::Correct;

        info!(
            "{} solved {:?}, {} points",
            self.session.player_name, word, self.session.points
        );
        self.event_bus.publish(GameEvent::GuessAccepted {
            word,
            points: self.session.points,
        });

        self.begin_round();
        GuessOutcome::Correct
    }

    pub fn submit_guess(&mut self, guess: &str) -> GuessOutcome {
        if !self.set_guess(guess) {
            return GuessOutcome::Ignored;
        }
        self.check_guess()
    }

    /// Give up on the current word. Costs one skip unless the pending guess
    /// turns out to be right, in which case it is scored like a normal answer.
    pub fn skip(&mut self) -> SkipOutcome {
        if self.phase != GamePhase::Active {
            return SkipOutcome::Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return SkipOutcome::Ignored;
        };
        if !round.is_accepting_input() {
            return SkipOutcome::Ignored;
        }
        if self.session.skips_remaining == 0 {
            return SkipOutcome::NoBudget;
        }

        let has_guess = !round.guess.trim().is_empty();
        if has_guess && is_correct_guess(&round.guess, &round.original) {
            return match self.check_guess() {
                GuessOutcome::Correct => SkipOutcome::AnsweredCorrectly,
                _ => SkipOutcome::Ignored,
            };
        }

        let word = round.original.clone();
        self.session.skips_remaining -= 1;
        debug!(
            "Skipped {:?}, {} skips left",
            word, self.session.skips_remaining
        );
        self.event_bus.publish(GameEvent::WordSkipped {
            word,
            skips_remaining: self.session.skips_remaining,
        });

        self.begin_round();
        SkipOutcome::Skipped
    }

    /// One second elapsed for the round identified by `token`.
    pub fn tick(&mut self, token: RoundToken) -> TickOutcome {
        if self.phase != GamePhase::Active {
            return TickOutcome::Stale;
        }
        let Some(round) = self.round.as_mut() else {
            return TickOutcome::Stale;
        };
        if round.token != token || !round.is_accepting_input() {
            debug!("Dropping stale tick for round {}", token);
            return TickOutcome::Stale;
        }

        let expired = round.count_down();
        let remaining_seconds = round.remaining_seconds;
        self.event_bus.publish(GameEvent::Tick {
            token,
            remaining_seconds,
        });

        if expired {
            self.time_out();
            TickOutcome::TimedOut
        } else {
            TickOutcome::Counted { remaining_seconds }
        }
    }

    /// Start a new session with the same player and word pool.
    pub fn restart(&mut self) -> bool {
        let Some(pool) = self.loaded_pool.clone() else {
            return false;
        };

        info!("Restarting session for {}", self.session.player_name);
        self.pool = pool;
        self.policy.reset();
        self.session = Session::new(self.session.player_name.clone(), self.config.skip_budget);
        self.latch.rearm();
        self.round = None;
        self.status_message = None;
        self.difficulty = self.policy.difficulty_label();
        self.event_bus.publish(GameEvent::SessionRestarted);
        self.begin_round();
        true
    }

    pub fn view(&self) -> RoundView {
        let round = self.round.as_ref();
        RoundView {
            phase: self.phase,
            player_name: self.session.player_name.clone(),
            shuffled: round.map(|r| r.shuffled.clone()),
            guess: round.map(|r| r.guess.clone()).unwrap_or_default(),
            remaining_seconds: round.map(|r| r.remaining_seconds).unwrap_or(0),
            skips_remaining: self.session.skips_remaining,
            points: self.session.points,
            difficulty: self.difficulty.clone(),
            message: round
                .and_then(|r| r.message.clone())
                .or_else(|| self.status_message.clone()),
            disabled: round.map(|r| r.disabled).unwrap_or(true),
        }
    }

    fn begin_round(&mut self) {
        let Some(word) = self.policy.next_word(&mut self.pool, &mut self.rng) else {
            self.finish();
            return;
        };

        let difficulty = self.policy.difficulty_label();
        if difficulty != self.difficulty {
            info!("Difficulty now {}", difficulty);
            self.difficulty = difficulty.clone();
            self.event_bus.publish(GameEvent::DifficultyChanged {
                label: difficulty.clone(),
            });
        }

        self.last_token += 1;
        let round = Round::new(self.last_token, word, self.config.round_seconds, &mut self.rng);
        self.event_bus.publish(GameEvent::RoundStarted {
            token: round.token,
            shuffled: round.shuffled.clone(),
            difficulty,
            seconds: round.remaining_seconds,
        });

        self.round = Some(round);
        self.status_message = None;
        self.phase = GamePhase::Active;
    }

    fn time_out(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.mark_timed_out();
        let token = round.token;
        let word = round.original.clone();
        self.phase = GamePhase::TimedOut;

        info!("Round {} timed out on {:?}", token, word);
        self.event_bus.publish(GameEvent::RoundTimedOut { token, word });
        self.submit_once();
    }

    fn finish(&mut self) {
        self.round = None;
        self.phase = GamePhase::Finished;
        self.status_message = Some(FINISHED_MESSAGE.to_string());

        info!(
            "Word pool exhausted, {} finished with {} points",
            self.session.player_name, self.session.points
        );
        self.event_bus.publish(GameEvent::SessionFinished {
            points: self.session.points,
        });
        self.submit_once();
    }

    fn submit_once(&mut self) {
        if !self.latch.try_claim() {
            debug!("Score already reported for this session");
            return;
        }
        let submission = build_submission(&self.session.player_name, self.session.points);
        self.event_bus.publish(GameEvent::ScoreReady { submission });
    }
}
