use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use hanabi_bot::{AgentError, BayesianAgent, BotParams, Policy, RuleBasedPolicy, Table};
use hanabi_core::game::{GameRecord, GameState, RuleViolation};
use hanabi_core::model::player::PlayerId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{AgentConfig, AgentKind, BenchmarkConfig, ResolvedOutputs, ValidationError};
use crate::logging::telemetry_dir;

/// Plays every configured agent through the same seeded games.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub agents: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;
        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
        })
    }

    /// Override the sample count of every sampling agent.
    pub fn with_samples(mut self, samples: usize) -> Self {
        for agent in &mut self.agents {
            if let AgentImplementation::Bayesian(params) = &mut agent.implementation {
                *params = params.with_samples(samples);
            }
        }
        self
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config);

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();

            for agent in &self.agents {
                let outcome = self.play_game(agent, game_index, game_seed)?;
                analytics.record_game(&outcome)?;
                write_game_row(&mut writer, &self.config, &outcome)?;
                rows_written += 1;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| telemetry_dir(&self.outputs).join("telemetry.jsonl"));

        Ok(RunSummary {
            games_played: self.config.games.count,
            agents: self.agents.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    fn play_game(
        &self,
        agent: &AgentBlueprint,
        game_index: usize,
        game_seed: u64,
    ) -> Result<GameOutcome, RunnerError> {
        let games = &self.config.games;
        let game = GameState::with_seed(games.players, game_seed)?.with_lives(games.lives);
        let seats = PlayerId::seats(games.players)
            .map(|seat| agent.spawn_policy(seat, &game, game_seed))
            .collect();
        let mut table = Table::new(game, seats)?;
        let mut metrics = DecisionMetrics::default();

        while table.game().turns() < games.max_turns {
            let seat = table.game().current_player();
            let start = Instant::now();
            let Some(played) = table.step()? else {
                break;
            };
            let elapsed_ms = metrics.record(start.elapsed());

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                let mv = table.moves().last().map(ToString::to_string).unwrap_or_default();
                event!(
                    target: "hanabi_bench::turn",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    agent = %agent.name,
                    game_index = game_index as u32,
                    seat = seat.0,
                    mv = %mv,
                    actor = %played.actor(),
                    score = table.game().score(),
                    elapsed_ms
                );
            }
        }

        let final_state = table.outcome();

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            let record = GameRecord {
                seed: game_seed,
                players: games.players,
                lives: games.lives,
                moves: final_state.moves.clone(),
            };
            let record_json = record.to_json()?;
            event!(
                target: "hanabi_bench::game",
                Level::INFO,
                run_id = %self.config.run_id,
                agent = %agent.name,
                game_index = game_index as u32,
                score = final_state.score,
                record = %record_json,
            );
        }
        Ok(GameOutcome {
            agent_name: agent.name.clone(),
            kind: agent.kind,
            game_index,
            game_seed,
            players: games.players,
            score: final_state.score,
            lives: final_state.lives,
            tokens: final_state.tokens,
            turns: final_state.turns,
            finished: final_state.finished,
            winnable: final_state.winnable,
            metrics: metrics.finalize(),
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{:05}", outcome.game_index),
        game_index: outcome.game_index,
        game_seed: outcome.game_seed,
        agent: outcome.agent_name.clone(),
        kind: outcome.kind,
        players: outcome.players,
        score: outcome.score,
        lives: outcome.lives,
        tokens: outcome.tokens,
        turns: outcome.turns,
        finished: outcome.finished,
        winnable: outcome.winnable,
        decisions: outcome.metrics.decisions,
        speed_ms_turn: outcome.metrics.avg_ms_per_decision,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Result of one agent playing one seeded game in every seat.
pub struct GameOutcome {
    pub agent_name: String,
    pub kind: AgentKind,
    pub game_index: usize,
    pub game_seed: u64,
    pub players: usize,
    pub score: u32,
    pub lives: u8,
    pub tokens: u8,
    pub turns: u32,
    pub finished: bool,
    pub winnable: bool,
    pub metrics: DecisionSummary,
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    game_seed: u64,
    agent: String,
    kind: AgentKind,
    players: usize,
    score: u32,
    lives: u8,
    tokens: u8,
    turns: u32,
    finished: bool,
    winnable: bool,
    decisions: u32,
    speed_ms_turn: f64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid agent configuration: {0}")]
    Config(#[from] ValidationError),
    #[error("agent failed: {0}")]
    Agent(#[from] AgentError),
    #[error("could not deal game: {0}")]
    Rules(#[from] RuleViolation),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

struct AgentBlueprint {
    name: String,
    kind: AgentKind,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    Bayesian(BotParams),
    RuleBased,
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, ValidationError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, ValidationError> {
        let implementation = match config.kind {
            AgentKind::Bayesian => AgentImplementation::Bayesian(config.bot_params()?),
            AgentKind::RuleBased => AgentImplementation::RuleBased,
        };

        Ok(Self {
            name: config.name.clone(),
            kind: config.kind,
            implementation,
        })
    }

    fn spawn_policy(&self, seat: PlayerId, game: &GameState, game_seed: u64) -> Box<dyn Policy> {
        match &self.implementation {
            AgentImplementation::Bayesian(params) => {
                let params = params.with_seed(game_seed);
                Box::new(BayesianAgent::new(seat, game, &params))
            }
            AgentImplementation::RuleBased => Box::new(RuleBasedPolicy::new(seat)),
        }
    }
}
