//! Display state built from engine events
//!
//! The dashboard is the consumer side of the engine queue: it only ever
//! changes by applying an [`EngineEvent`].

use chimera_core::{EngineEvent, EngineState, Failure, Memory, StabilityThresholds};
use chrono::{DateTime, Local};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Characters of the action name shown per replay row
const ACTION_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Nominal,
    Critical,
}

/// What applying an event changed
#[derive(Debug, PartialEq)]
pub enum Applied {
    /// A log line to print
    Log(String),
    /// Status fields changed
    Updated,
    /// The run ended
    Finished,
}

#[derive(Debug)]
pub struct Dashboard {
    thresholds: StabilityThresholds,
    state: EngineState,
    iteration: Option<String>,
    total_q: f64,
    coherence: f64,
    volatility: f64,
    stability: Stability,
    buffer: Vec<Memory>,
    outcome: Option<Failure>,
}

impl Dashboard {
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self {
            thresholds,
            state: EngineState::Idle,
            iteration: None,
            total_q: 0.0,
            coherence: 0.0,
            volatility: 0.0,
            stability: Stability::Nominal,
            buffer: Vec::new(),
            outcome: None,
        }
    }

    pub fn apply(&mut self, event: EngineEvent) -> Applied {
        match event {
            EngineEvent::Log(line) => Applied::Log(line),
            EngineEvent::State(state) => {
                self.state = state;
                Applied::Updated
            }
            EngineEvent::Iteration(report) => {
                self.state = report.state;
                self.iteration = Some(report.progress());
                self.total_q = report.total_q;
                self.coherence = report.coherence;
                self.volatility = report.volatility;
                self.stability = if self.thresholds.is_volatility_critical(report.volatility) {
                    Stability::Critical
                } else {
                    Stability::Nominal
                };
                self.buffer = report.buffer;
                Applied::Updated
            }
            EngineEvent::Finished(failure) => {
                self.outcome = Some(failure);
                Applied::Finished
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }

    pub fn outcome(&self) -> Option<&Failure> {
        self.outcome.as_ref()
    }

    /// One-line summary of the status fields
    pub fn status_line(&self) -> String {
        let stability = match self.stability {
            Stability::Nominal => "STABILITY: NOMINAL".green(),
            Stability::Critical => "STABILITY: CRITICAL".red().bold(),
        };
        format!(
            "[{}] iter {} | Q {:.4} | coherence {:.4} | volatility {:.4} | {}",
            self.state.name().cyan(),
            self.iteration.as_deref().unwrap_or("N/A"),
            self.total_q,
            self.coherence,
            self.volatility,
            stability
        )
    }

    /// Replay rows, newest first: `T-00`, state, action, reward
    pub fn replay_rows(&self) -> Vec<[String; 4]> {
        self.buffer
            .iter()
            .rev()
            .enumerate()
            .map(|(i, memory)| {
                [
                    format!("T-{:02}", i),
                    memory.state.clone(),
                    memory.action.chars().take(ACTION_WIDTH).collect(),
                    memory.reward.clone(),
                ]
            })
            .collect()
    }

    pub fn replay_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["T", "State", "Action", "Reward"]);
        for row in self.replay_rows() {
            table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
        }
        table
    }
}

/// `HH:MM:SS.mmm > message`
pub fn timestamped(now: DateTime<Local>, message: &str) -> String {
    format!("{} > {}", now.format("%H:%M:%S%.3f"), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chimera_core::IterationReport;
    use chrono::TimeZone;

    fn thresholds() -> StabilityThresholds {
        StabilityThresholds {
            coherence_min: 0.4,
            volatility_max: 0.9,
        }
    }

    fn report(iteration: u32, volatility: f64, buffer: Vec<Memory>) -> IterationReport {
        IterationReport {
            state: EngineState::Active,
            iteration,
            max_iterations: 500,
            coherence: 0.7,
            volatility,
            total_q: 0.3,
            buffer,
        }
    }

    #[test]
    fn test_apply_iteration_updates_fields() {
        let mut dashboard = Dashboard::new(thresholds());
        let applied = dashboard.apply(EngineEvent::Iteration(report(12, 0.38, Vec::new())));

        assert_eq!(applied, Applied::Updated);
        assert_eq!(dashboard.state(), EngineState::Active);
        assert_eq!(dashboard.stability(), Stability::Nominal);
        let line = dashboard.status_line();
        assert!(line.contains("12/500"));
        assert!(line.contains("0.3800"));
    }

    #[test]
    fn test_volatility_alert() {
        let mut dashboard = Dashboard::new(thresholds());
        dashboard.apply(EngineEvent::Iteration(report(1, 0.95, Vec::new())));
        assert_eq!(dashboard.stability(), Stability::Critical);

        dashboard.apply(EngineEvent::Iteration(report(2, 0.2, Vec::new())));
        assert_eq!(dashboard.stability(), Stability::Nominal);
    }

    #[test]
    fn test_log_and_finish() {
        let mut dashboard = Dashboard::new(thresholds());
        assert_eq!(
            dashboard.apply(EngineEvent::Log("hello".to_string())),
            Applied::Log("hello".to_string())
        );
        assert!(dashboard.status_line().contains("N/A"));

        assert_eq!(
            dashboard.apply(EngineEvent::Finished(Failure::ConvergenceTimeout)),
            Applied::Finished
        );
        assert_eq!(dashboard.outcome(), Some(&Failure::ConvergenceTimeout));
    }

    #[test]
    fn test_replay_rows_newest_first_and_truncated() {
        let mut dashboard = Dashboard::new(thresholds());
        let buffer = vec![
            Memory::new("aaaaaaaa", "alpha", 0.1),
            Memory::new("bbbbbbbb", "extraordinarily_long", 0.2),
        ];
        dashboard.apply(EngineEvent::Iteration(report(2, 0.1, buffer)));

        let rows = dashboard.replay_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "T-00");
        assert_eq!(rows[0][1], "bbbbbbbb");
        assert_eq!(rows[0][2], "extraordin");
        assert_eq!(rows[1][0], "T-01");
        assert_eq!(rows[1][3], "0.100");
        assert!(dashboard.replay_table().to_string().contains("aaaaaaaa"));
    }

    #[test]
    fn test_timestamp_format() {
        let now = Local.with_ymd_and_hms(2026, 10, 15, 9, 5, 7).unwrap();
        assert_eq!(timestamped(now, "ready"), "09:05:07.000 > ready");
    }
}
