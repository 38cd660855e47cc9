use word_scramble_types::{GamePhase, LeaderboardEntry, RoundView};

/// Seconds at which a running countdown is announced.
pub fn announces_tick(remaining_seconds: u32) -> bool {
    remaining_seconds > 0 && (remaining_seconds <= 5 || remaining_seconds % 10 == 0)
}

pub fn round_banner(view: &RoundView) -> String {
    let Some(shuffled) = &view.shuffled else {
        return phase_line(view);
    };

    format!(
        "[{}] Unscramble: {}   ({}s left, {} skips, {} points)",
        view.difficulty,
        shuffled.to_uppercase(),
        view.remaining_seconds,
        view.skips_remaining,
        view.points
    )
}

pub fn phase_line(view: &RoundView) -> String {
    match view.phase {
        GamePhase::Loading => "Loading words...".to_string(),
        GamePhase::Active | GamePhase::Correct => format!("{} points", view.points),
        GamePhase::TimedOut | GamePhase::Finished => format!(
            "Final score for {}: {} points. Type /restart to play again.",
            view.player_name, view.points
        ),
    }
}

pub fn tick_line(remaining_seconds: u32) -> String {
    format!("  {}s left", remaining_seconds)
}

/// Calendar date of an RFC 3339 timestamp, or the raw text if it is too short.
fn submitted_on(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

pub fn leaderboard_table(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "Leaderboard: no scores yet".to_string();
    }

    let width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut lines = vec!["Leaderboard".to_string()];
    for (rank, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {:<width$}  {:>4}  {}",
            rank + 1,
            entry.name,
            entry.points,
            submitted_on(&entry.timestamp),
            width = width
        ));
    }
    lines.join("\n")
}
