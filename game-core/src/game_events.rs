use word_scramble_types::{RoundToken, ScoreSubmission};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WordsLoaded {
        word_count: usize,
    },
    RoundStarted {
        token: RoundToken,
        shuffled: String,
        difficulty: String,
        seconds: u32,
    },
    Tick {
        token: RoundToken,
        remaining_seconds: u32,
    },
    GuessAccepted {
        word: String,
        points: u32,
    },
    GuessRejected {
        guess: String,
    },
    WordSkipped {
        word: String,
        skips_remaining: u32,
    },
    DifficultyChanged {
        label: String,
    },
    RoundTimedOut {
        token: RoundToken,
        word: String,
    },
    SessionFinished {
        points: u32,
    },
    ScoreReady {
        submission: ScoreSubmission,
    },
    SessionRestarted,
}

impl GameEvent {
    /// Token of the round the event belongs to, for round-scoped events.
    pub fn round_token(&self) -> Option<RoundToken> {
        match self {
            GameEvent::RoundStarted { token, .. } => Some(*token),
            GameEvent::Tick { token, .. } => Some(*token),
            GameEvent::RoundTimedOut { token, .. } => Some(*token),
            _ => None,
        }
    }

    /// True for events after which no countdown may keep running.
    pub fn ends_countdown(&self) -> bool {
        matches!(
            self,
            GameEvent::RoundTimedOut { .. } | GameEvent::SessionFinished { .. }
        )
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
