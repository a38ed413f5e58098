use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::config::{AgentKind, BenchmarkConfig};
use crate::tournament::GameOutcome;

/// Two-sided coverage of the reported intervals.
const CONFIDENCE: f64 = 0.95;
const PERFECT_SCORE: u32 = 25;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent '{0}' produced results but is missing from configuration")]
    UnknownAgent(String),
    #[error("statistics error: {0}")]
    Stats(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-game outcomes into per-agent reports.
pub struct AnalyticsCollector {
    baseline: Option<String>,
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    /// Scores per game index and agent, for paired comparisons.
    by_game: BTreeMap<usize, HashMap<String, f64>>,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(agent.name.clone(), AgentAccumulator::new(agent.kind));
            order.push(agent.name.clone());
        }

        Self {
            baseline: config.metrics.baseline.clone(),
            agents,
            agent_order: order,
            by_game: BTreeMap::new(),
        }
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) -> Result<(), AnalyticsError> {
        let acc = self
            .agents
            .get_mut(&outcome.agent_name)
            .ok_or_else(|| AnalyticsError::UnknownAgent(outcome.agent_name.clone()))?;
        acc.record(outcome);
        self.by_game
            .entry(outcome.game_index)
            .or_default()
            .insert(outcome.agent_name.clone(), f64::from(outcome.score));
        Ok(())
    }

    pub fn finalize(mut self) -> Result<AnalyticsSummary, AnalyticsError> {
        let z = normal_quantile()?;

        let mut reports = Vec::new();
        for name in &self.agent_order {
            if let Some(acc) = self.agents.remove(name) {
                reports.push(acc.into_report(name.clone(), z));
            }
        }

        if let Some(baseline) = self.baseline.as_deref() {
            for report in &mut reports {
                if report.name == baseline {
                    continue;
                }
                let diffs: Vec<f64> = self
                    .by_game
                    .values()
                    .filter_map(|scores| Some(scores.get(&report.name)? - scores.get(baseline)?))
                    .collect();
                if !diffs.is_empty() {
                    report.delta_vs_baseline = Some(interval(&diffs, z));
                }
            }
        }

        Ok(AnalyticsSummary {
            baseline: self.baseline,
            agents: reports,
        })
    }
}

struct AgentAccumulator {
    kind: AgentKind,
    scores: Vec<f64>,
    perfect: usize,
    unwinnable: usize,
    lives: u64,
    total_ms: f64,
    decisions: u64,
}

impl AgentAccumulator {
    fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            scores: Vec::new(),
            perfect: 0,
            unwinnable: 0,
            lives: 0,
            total_ms: 0.0,
            decisions: 0,
        }
    }

    fn record(&mut self, outcome: &GameOutcome) {
        self.scores.push(f64::from(outcome.score));
        if outcome.score == PERFECT_SCORE {
            self.perfect += 1;
        }
        if !outcome.winnable {
            self.unwinnable += 1;
        }
        self.lives += u64::from(outcome.lives);
        self.total_ms += outcome.metrics.total_ms;
        self.decisions += u64::from(outcome.metrics.decisions);
    }

    fn into_report(self, name: String, z: f64) -> AgentReport {
        let games = self.scores.len();
        let score = interval(&self.scores, z);
        let std_dev = if games > 1 {
            self.scores.iter().std_dev()
        } else {
            0.0
        };
        let rate = |count: usize| {
            if games == 0 {
                0.0
            } else {
                count as f64 / games as f64
            }
        };

        AgentReport {
            name,
            kind: self.kind,
            games,
            score,
            std_dev,
            perfect_rate: rate(self.perfect),
            unwinnable_rate: rate(self.unwinnable),
            avg_lives: if games == 0 {
                0.0
            } else {
                self.lives as f64 / games as f64
            },
            average_ms_per_decision: if self.decisions == 0 {
                0.0
            } else {
                self.total_ms / self.decisions as f64
            },
            delta_vs_baseline: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: Option<String>,
    pub agents: Vec<AgentReport>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }

    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str("# Tournament Summary\n\n");
        match self.baseline.as_deref() {
            Some(baseline) => rows.push_str(&format!("Baseline: `{baseline}`\n\n")),
            None => rows.push_str("Baseline: none\n\n"),
        }
        rows.push_str("| Agent | Kind | Games | Avg score | 95% CI | Std dev | Δ vs baseline | Perfect % | Unwinnable % | Avg lives | Avg ms/decision |\n");
        rows.push_str("|-------|------|-------|-----------|--------|---------|----------------|-----------|--------------|-----------|------------------|\n");

        for agent in &self.agents {
            let delta = match agent.delta_vs_baseline {
                Some(delta) => format!(
                    "{:+.3} [{:+.3}, {:+.3}]",
                    delta.mean, delta.low, delta.high
                ),
                None => "-".to_string(),
            };
            rows.push_str(&format!(
                "| {name} | {kind:?} | {games} | {avg:.3} | [{low:.3}, {high:.3}] | {std:.3} | {delta} | {perfect:.1}% | {unwinnable:.1}% | {lives:.2} | {latency:.2} |\n",
                name = agent.name,
                kind = agent.kind,
                games = agent.games,
                avg = agent.score.mean,
                low = agent.score.low,
                high = agent.score.high,
                std = agent.std_dev,
                perfect = agent.perfect_rate * 100.0,
                unwinnable = agent.unwinnable_rate * 100.0,
                lives = agent.avg_lives,
                latency = agent.average_ms_per_decision,
            ));
        }
        rows
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: AgentKind,
    pub games: usize,
    pub score: Interval,
    pub std_dev: f64,
    pub perfect_rate: f64,
    pub unwinnable_rate: f64,
    pub avg_lives: f64,
    pub average_ms_per_decision: f64,
    /// Paired score difference against the baseline over shared games.
    pub delta_vs_baseline: Option<Interval>,
}

/// Sample mean with a normal-approximation confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub mean: f64,
    pub low: f64,
    pub high: f64,
}

fn normal_quantile() -> Result<f64, AnalyticsError> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| AnalyticsError::Stats(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - (1.0 - CONFIDENCE) / 2.0))
}

fn interval(values: &[f64], z: f64) -> Interval {
    if values.is_empty() {
        return Interval {
            mean: 0.0,
            low: 0.0,
            high: 0.0,
        };
    }
    let mean = values.iter().mean();
    if values.len() == 1 {
        return Interval {
            mean,
            low: mean,
            high: mean,
        };
    }
    let std_error = values.iter().std_dev() / (values.len() as f64).sqrt();
    let margin = z * std_error;
    Interval {
        mean,
        low: mean - margin,
        high: mean + margin,
    }
}
