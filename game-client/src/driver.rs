use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use word_scramble_core::{
    CORRECT_MESSAGE, FINISHED_MESSAGE, GameEvent, GameEventHandler, RoundEngine, SkipOutcome,
    TRY_AGAIN_MESSAGE, TickOutcome, WordPool, rank_leaderboard,
};
use word_scramble_types::{
    GamePhase, LeaderboardEntry, MAX_NAME_LENGTH, RoundToken, RoundView, ScoreSubmission,
};

use crate::command::{Command, HELP_TEXT};
use crate::config::Config;
use crate::countdown::Countdown;
use crate::error::ClientError;
use crate::profile::ProfileStore;
use crate::render;
use crate::score_client::ScoreService;
use crate::word_source::{INITIAL_RETRY_DELAY, WordSource, fetch_with_retry};

/// Forwards engine events into the driver's queue.
struct ChannelHandler {
    sender: mpsc::UnboundedSender<GameEvent>,
}

impl GameEventHandler for ChannelHandler {
    fn handle_event(&mut self, event: GameEvent) {
        let _ = self.sender.send(event);
    }
}

/// Results of background work, delivered back to the driver loop.
#[derive(Debug)]
pub enum DriverInput {
    WordsLoaded(WordPool),
    WordsUnavailable(String),
    Leaderboard(Result<Vec<LeaderboardEntry>, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    pub leaderboard_size: usize,
    pub fetch_attempts: u32,
    pub retry_delay: Duration,
}

impl DriverOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            leaderboard_size: config.leaderboard_size,
            fetch_attempts: config.words_fetch_attempts,
            retry_delay: INITIAL_RETRY_DELAY,
        }
    }
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Owns the engine and feeds it everything that happens: player lines,
/// countdown ticks, word-load results and leaderboard replies. All of it is
/// handled one message at a time on a single task, so the engine never sees
/// two inputs at once.
pub struct GameDriver<W: Write> {
    engine: RoundEngine,
    events: mpsc::UnboundedReceiver<GameEvent>,
    countdown: Countdown,
    ticks: mpsc::UnboundedReceiver<RoundToken>,
    inputs_tx: mpsc::UnboundedSender<DriverInput>,
    inputs: mpsc::UnboundedReceiver<DriverInput>,
    word_source: Arc<dyn WordSource>,
    score_service: Arc<dyn ScoreService>,
    profile: ProfileStore,
    options: DriverOptions,
    awaiting_name: bool,
    pending_pool: Option<WordPool>,
    fetching: bool,
    out: W,
}

impl<W: Write> GameDriver<W> {
    pub fn new(
        mut engine: RoundEngine,
        word_source: Arc<dyn WordSource>,
        score_service: Arc<dyn ScoreService>,
        profile: ProfileStore,
        options: DriverOptions,
        out: W,
    ) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        engine
            .event_bus
            .add_handler(Box::new(ChannelHandler { sender: event_tx }));

        let (tick_tx, ticks) = mpsc::unbounded_channel();
        let (inputs_tx, inputs) = mpsc::unbounded_channel();

        let awaiting_name = match profile.player_name() {
            Some(name) => {
                engine.set_player_name(name);
                false
            }
            None => true,
        };

        Self {
            engine,
            events,
            countdown: Countdown::new(tick_tx),
            ticks,
            inputs_tx,
            inputs,
            word_source,
            score_service,
            profile,
            options,
            awaiting_name,
            pending_pool: None,
            fetching: false,
            out,
        }
    }

    pub fn view(&self) -> RoundView {
        self.engine.view()
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    pub fn is_awaiting_name(&self) -> bool {
        self.awaiting_name
    }

    /// Round the countdown is currently running for.
    pub fn countdown_token(&self) -> Option<RoundToken> {
        self.countdown.token()
    }

    /// Greet the player and start fetching words.
    pub fn start(&mut self) -> Result<(), ClientError> {
        writeln!(self.out, "Word Scramble! Type /help for commands.")?;
        if self.awaiting_name {
            writeln!(self.out, "What is your name?")?;
        } else {
            writeln!(self.out, "Welcome back, {}!", self.engine.session().player_name)?;
        }
        self.spawn_word_fetch();
        self.out.flush()?;
        Ok(())
    }

    pub async fn run(mut self, mut lines: mpsc::Receiver<String>) -> Result<(), ClientError> {
        self.start()?;
        while self.step(&mut lines).await? == Flow::Continue {}
        self.countdown.stop();
        writeln!(self.out, "Bye!")?;
        self.out.flush()?;
        Ok(())
    }

    /// Wait for the next input of any kind and apply it.
    pub async fn step(&mut self, lines: &mut mpsc::Receiver<String>) -> Result<Flow, ClientError> {
        let flow = tokio::select! {
            line = lines.recv() => match line {
                Some(line) => self.handle_line(&line)?,
                None => Flow::Quit,
            },
            Some(token) = self.ticks.recv() => {
                self.handle_tick(token);
                Flow::Continue
            }
            Some(input) = self.inputs.recv() => {
                self.handle_input(input)?;
                Flow::Continue
            }
        };

        self.drain_events()?;
        self.out.flush()?;
        Ok(flow)
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow, ClientError> {
        let command = Command::parse(line);

        if self.awaiting_name {
            match command {
                Command::Quit => return Ok(Flow::Quit),
                Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
                Command::Guess(_) => self.enter_name(line)?,
                // A failed word fetch must stay retryable before naming
                Command::Restart if self.pending_pool.is_none() => self.restart()?,
                _ => writeln!(self.out, "Enter your name first:")?,
            }
            return Ok(Flow::Continue);
        }

        match command {
            Command::Guess(guess) => self.guess(&guess)?,
            Command::Skip(guess) => self.skip(guess.as_deref())?,
            Command::Restart => self.restart()?,
            Command::Leaderboard => self.spawn_leaderboard_fetch(),
            Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(name) => writeln!(
                self.out,
                "Unknown command /{}. Type /help for commands.",
                name
            )?,
        }
        Ok(Flow::Continue)
    }

    pub fn handle_tick(&mut self, token: RoundToken) {
        if self.engine.tick(token) == TickOutcome::Stale {
            debug!("Ignored tick for round {}", token);
        }
    }

    pub fn handle_input(&mut self, input: DriverInput) -> Result<(), ClientError> {
        match input {
            DriverInput::WordsLoaded(pool) => {
                self.fetching = false;
                if self.awaiting_name {
                    self.pending_pool = Some(pool);
                } else {
                    self.engine.load_words(pool);
                }
            }
            DriverInput::WordsUnavailable(reason) => {
                self.fetching = false;
                writeln!(
                    self.out,
                    "Word list unavailable ({}). Type /restart to try again.",
                    reason
                )?;
            }
            DriverInput::Leaderboard(Ok(entries)) => {
                let entries = rank_leaderboard(entries, self.options.leaderboard_size);
                writeln!(self.out, "{}", render::leaderboard_table(&entries))?;
            }
            DriverInput::Leaderboard(Err(reason)) => {
                writeln!(self.out, "Leaderboard unavailable: {}", reason)?;
            }
        }
        Ok(())
    }

    fn enter_name(&mut self, line: &str) -> Result<(), ClientError> {
        let name = line.trim();
        if name.is_empty() {
            writeln!(self.out, "What is your name?")?;
            return Ok(());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            writeln!(
                self.out,
                "Names are limited to {} characters. Try again:",
                MAX_NAME_LENGTH
            )?;
            return Ok(());
        }

        self.engine.set_player_name(name);
        self.remember_name(name);
        self.awaiting_name = false;
        writeln!(self.out, "Hi {}!", name)?;

        match self.pending_pool.take() {
            Some(pool) => {
                self.engine.load_words(pool);
            }
            None => writeln!(self.out, "Loading words...")?,
        }
        Ok(())
    }

    fn guess(&mut self, guess: &str) -> Result<(), ClientError> {
        if self.explain_inactive()? {
            return Ok(());
        }
        self.engine.submit_guess(guess);
        Ok(())
    }

    fn skip(&mut self, guess: Option<&str>) -> Result<(), ClientError> {
        if self.explain_inactive()? {
            return Ok(());
        }
        if let Some(guess) = guess {
            self.engine.set_guess(guess);
        }
        if self.engine.skip() == SkipOutcome::NoBudget {
            writeln!(self.out, "No skips left.")?;
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<(), ClientError> {
        if self.engine.restart() {
            return Ok(());
        }
        if self.fetching {
            writeln!(self.out, "Still loading words...")?;
        } else {
            writeln!(self.out, "Fetching the word list again...")?;
            self.spawn_word_fetch();
        }
        Ok(())
    }

    /// Tell the player why input is not being taken. Returns true if so.
    fn explain_inactive(&mut self) -> Result<bool, ClientError> {
        match self.engine.phase() {
            GamePhase::Active | GamePhase::Correct => Ok(false),
            GamePhase::Loading => {
                writeln!(self.out, "Still loading words...")?;
                Ok(true)
            }
            GamePhase::TimedOut | GamePhase::Finished => {
                writeln!(self.out, "Game over. Type /restart to play again.")?;
                Ok(true)
            }
        }
    }

    fn drain_events(&mut self) -> Result<(), ClientError> {
        while let Ok(event) = self.events.try_recv() {
            self.on_event(event)?;
        }
        Ok(())
    }

    fn on_event(&mut self, event: GameEvent) -> Result<(), ClientError> {
        match event {
            GameEvent::WordsLoaded { word_count } => {
                info!("Playing with {} words", word_count);
            }
            GameEvent::RoundStarted { token, .. } => {
                if self.engine.current_token() == Some(token) {
                    self.countdown.start(token);
                    writeln!(self.out, "{}", render::round_banner(&self.engine.view()))?;
                }
            }
            GameEvent::Tick {
                remaining_seconds, ..
            } => {
                if render::announces_tick(remaining_seconds) {
                    writeln!(self.out, "{}", render::tick_line(remaining_seconds))?;
                }
            }
            GameEvent::GuessAccepted { word, points } => {
                writeln!(self.out, "{} {} ({} points)", CORRECT_MESSAGE, word, points)?;
            }
            GameEvent::GuessRejected { .. } => {
                writeln!(self.out, "{}", TRY_AGAIN_MESSAGE)?;
            }
            GameEvent::WordSkipped {
                word,
                skips_remaining,
            } => {
                writeln!(
                    self.out,
                    "Skipped. The word was \"{}\". {} skips left.",
                    word, skips_remaining
                )?;
            }
            GameEvent::DifficultyChanged { label } => {
                writeln!(self.out, "Level up! Now playing: {}", label)?;
            }
            GameEvent::RoundTimedOut { word, .. } => {
                self.countdown.stop();
                writeln!(self.out, "Time's up! The word was \"{}\"", word)?;
                writeln!(self.out, "{}", render::phase_line(&self.engine.view()))?;
            }
            GameEvent::SessionFinished { .. } => {
                self.countdown.stop();
                writeln!(self.out, "{}", FINISHED_MESSAGE)?;
                writeln!(self.out, "{}", render::phase_line(&self.engine.view()))?;
            }
            GameEvent::ScoreReady { submission } => {
                self.remember_name(&submission.name);
                self.spawn_submission(submission);
            }
            GameEvent::SessionRestarted => {
                writeln!(self.out, "New game!")?;
            }
        }
        Ok(())
    }

    fn remember_name(&mut self, name: &str) {
        if let Err(e) = self.profile.set_player_name(name) {
            warn!("Could not save player name: {}", e);
        }
    }

    fn spawn_word_fetch(&mut self) {
        self.fetching = true;
        let source = self.word_source.clone();
        let inputs = self.inputs_tx.clone();
        let attempts = self.options.fetch_attempts;
        let delay = self.options.retry_delay;

        tokio::spawn(async move {
            let input = match fetch_with_retry(source.as_ref(), attempts, delay).await {
                Ok(pool) => DriverInput::WordsLoaded(pool),
                Err(e) => {
                    warn!("Giving up on {}: {}", source.describe(), e);
                    DriverInput::WordsUnavailable(e.to_string())
                }
            };
            let _ = inputs.send(input);
        });
    }

    /// Send the score without waiting for it, then show the leaderboard.
    fn spawn_submission(&self, submission: ScoreSubmission) {
        let service = self.score_service.clone();
        let inputs = self.inputs_tx.clone();
        let limit = self.options.leaderboard_size;

        tokio::spawn(async move {
            match service.submit_score(&submission).await {
                Ok(status) => info!("Score {} {:?}", submission.id, status),
                Err(e) => warn!("Score submission {} failed: {}", submission.id, e),
            }
            let result = service.leaderboard(limit).await.map_err(|e| e.to_string());
            let _ = inputs.send(DriverInput::Leaderboard(result));
        });
    }

    fn spawn_leaderboard_fetch(&self) {
        let service = self.score_service.clone();
        let inputs = self.inputs_tx.clone();
        let limit = self.options.leaderboard_size;

        tokio::spawn(async move {
            let result = service.leaderboard(limit).await.map_err(|e| {
                warn!("Leaderboard request failed: {}", e);
                e.to_string()
            });
            let _ = inputs.send(DriverInput::Leaderboard(result));
        });
    }
}
