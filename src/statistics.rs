use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub turns: usize,
    pub total_moves: usize,
    pub attacks: usize,
    pub waits: usize,
    pub panics: usize,
    pub search_calls: usize,
    pub optimal_path_length: usize,
    pub route_efficiency: f64,
    pub reached_exit: bool,
    pub player_died: bool,
    pub final_health: i32,
}

impl Statistics {
    pub fn new(optimal_path_length: usize) -> Self {
        Statistics {
            optimal_path_length,
            ..Statistics::default()
        }
    }

    /// Moves taken per move of the shortest route; 1.0 is optimal.
    pub fn calculate_efficiency(&mut self) {
        if self.total_moves > 0 && self.optimal_path_length > 0 {
            self.route_efficiency = self.total_moves as f64 / self.optimal_path_length as f64;
        } else {
            self.route_efficiency = 0.0;
        }
    }

    pub fn extra_moves(&self) -> usize {
        self.total_moves.saturating_sub(self.optimal_path_length)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reached Exit: {}", self.reached_exit)?;
        if self.player_died {
            writeln!(f, "Player Died: true")?;
        }
        writeln!(f, "Turns: {}", self.turns)?;
        writeln!(f, "Total Moves: {}", self.total_moves)?;
        writeln!(f, "Attacks: {}", self.attacks)?;
        writeln!(f, "Waits: {}", self.waits)?;
        writeln!(f, "Panics: {}", self.panics)?;
        writeln!(f, "Search Calls: {}", self.search_calls)?;
        writeln!(f, "Optimal Path Length: {}", self.optimal_path_length)?;
        writeln!(f, "Final Health: {}", self.final_health)?;
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        Ok(())
    }
}

/// Wall-clock time spent deciding each turn.
#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub decision_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.decision_times.push(elapsed);
    }

    pub fn average_decision_time(&self) -> Duration {
        if self.decision_times.is_empty() {
            Duration::from_nanos(0)
        } else {
            self.total_decision_time() / self.decision_times.len() as u32
        }
    }

    pub fn total_decision_time(&self) -> Duration {
        self.decision_times.iter().sum()
    }

    pub fn total_calls(&self) -> usize {
        self.decision_times.len()
    }
}
