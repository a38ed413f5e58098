use std::fs;

use hanabi_bench::config::BenchmarkConfig;
use hanabi_bench::tournament::TournamentRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
games:
  seed: 4242
  count: 2
  players: 3
agents:
  - name: "discarder"
    kind: "rule_based"
  - name: "bayes"
    kind: "bayesian"
    params:
      samples: 4
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
metrics:
  baseline: "discarder"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

/// JSONL rows with wall-clock timing zeroed.
fn normalized_rows(path: &std::path::Path) -> Vec<serde_json::Value> {
    let jsonl = fs::read_to_string(path).expect("jsonl readable");
    jsonl
        .lines()
        .map(|line| {
            let mut value: serde_json::Value =
                serde_json::from_str(line).expect("row decodes to JSON");
            if let Some(speed) = value.get_mut("speed_ms_turn") {
                *speed = serde_json::json!(0.0);
            }
            value
        })
        .collect()
}

fn run_once() -> Vec<serde_json::Value> {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let outputs = config.resolved_outputs();

    let runner = TournamentRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("tournament completes");

    assert_eq!(summary.games_played, 2);
    assert_eq!(summary.agents, 2);
    assert_eq!(summary.rows_written, 4);
    assert!(summary.telemetry_path.is_none());

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| discarder | RuleBased | 2 |"));
    assert!(markdown.contains("| bayes | Bayesian | 2 |"));

    normalized_rows(&summary.jsonl_path)
}

#[test]
fn tournament_smoke_test_is_deterministic() {
    let first = run_once();
    let second = run_once();
    assert_eq!(first.len(), 4);
    assert_eq!(first, second);

    for row in &first {
        assert_eq!(row["run_id"], "test_smoke");
        assert_eq!(row["players"], 3);
        assert_eq!(row["finished"], true);
        assert!(row["score"].as_u64().expect("score") <= 25);
    }

    // Both agents faced the same shuffled deck in each game.
    assert_eq!(first[0]["game_seed"], first[1]["game_seed"]);
    assert_ne!(first[0]["game_seed"], first[2]["game_seed"]);
    assert_eq!(first[0]["agent"], "discarder");
    assert_eq!(first[0]["score"], 0);
    assert_eq!(first[0]["kind"], "rule_based");
}
