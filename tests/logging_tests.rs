// tests/logging_tests.rs
//
// JSONL telemetry sink:
// - one JSON object per step, parseable with serde_json
// - step count and terminal flag match the episode summary

use vigilsim::{run_episode, ConstantPolicy, Env, FileSink};

#[test]
fn test_file_sink_writes_one_line_per_step() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("steps.jsonl");
    let path_str = path.to_str().expect("utf8 path");

    let mut env = Env::evacuation();
    let mut policy = ConstantPolicy::new(7);
    let mut sink = FileSink::create(path_str).expect("create sink");

    let summary =
        run_episode(&mut env, &mut policy, &mut sink, 3, Some(42)).expect("episode completes");
    sink.flush().expect("flush");

    let contents = std::fs::read_to_string(&path).expect("read log");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len() as u64, summary.total_steps);

    for (i, line) in lines.iter().enumerate() {
        let record: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
        assert_eq!(record["episode"], 3);
        assert_eq!(record["step"], (i + 1) as u64);
        assert_eq!(record["action"], 7);
        assert_eq!(record["action_name"], "wait");
        assert_eq!(record["reward"], -5.0);
        assert_eq!(record["state"].as_array().expect("state array").len(), 4);
    }

    let last: serde_json::Value =
        serde_json::from_str(lines.last().expect("nonempty")).expect("valid JSON line");
    assert_eq!(last["done"], true);
}
