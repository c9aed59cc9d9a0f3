use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn robokop_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_robokop"))
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("serialize fixture"))
        .expect("write fixture");
    path
}

fn run(args: &[&str], files: &[&Path]) -> Output {
    let mut command = Command::new(robokop_bin());
    command
        .env_remove("ROBOKOP_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    command.args(args);
    for file in files {
        command.arg(file);
    }
    command.output().expect("run robokop")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn biolink_document() -> Value {
    json!({
        "classes": {
            "named thing": {},
            "gene": {"is_a": "named thing"},
            "disease": {"is_a": "named thing"},
            "small molecule": {"is_a": "named thing"}
        },
        "slots": {
            "related to": {"domain": "named thing", "range": "named thing"},
            "treats": {"is_a": "related to", "domain": "small molecule", "range": "disease"}
        }
    })
}

fn scored_message() -> Value {
    json!({
        "message": {
            "query_graph": {
                "nodes": {
                    "n0": {"ids": ["MONDO:0005148"], "categories": ["biolink:Disease"]},
                    "n1": {"categories": ["biolink:Gene"]}
                },
                "edges": {"e0": {"subject": "n1", "object": "n0"}}
            },
            "knowledge_graph": {
                "nodes": {
                    "MONDO:0005148": {"name": "type 2 diabetes mellitus", "categories": ["biolink:Disease"]},
                    "NCBIGene:3630": {"name": "INS", "categories": ["biolink:Gene"]},
                    "NCBIGene:5468": {"name": "PPARG", "categories": ["biolink:Gene"]}
                },
                "edges": {}
            },
            "results": [
                {
                    "node_bindings": {"n0": [{"id": "MONDO:0005148"}], "n1": [{"id": "NCBIGene:5468"}]},
                    "analyses": [{"edge_bindings": {}, "score": 0.25}]
                },
                {
                    "node_bindings": {"n0": [{"id": "MONDO:0005148"}], "n1": [{"id": "NCBIGene:3630"}]},
                    "analyses": [{"edge_bindings": {}, "score": 0.5}, {"edge_bindings": {}, "score": 1.0}]
                }
            ]
        }
    })
}

#[test]
fn validate_accepts_well_formed_message() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(&dir, "message.json", &scored_message());

    let output = run(&["validate"], &[&input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("is valid"));
}

#[test]
fn validate_reports_problems_and_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(
        &dir,
        "broken.json",
        &json!({"message": {"query_graph": {"nodes": {"n0": {}}, "edges": {"e0": {"subject": "n0"}}}}}),
    );

    let output = run(&["validate"], &[&input]);
    assert!(!output.status.success());
    assert!(stderr(&output)
        .contains("Each query graph edge must have a valid \"subject\" and \"object\" property"));
}

#[test]
fn validate_flags_bindings_to_unknown_query_nodes() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(
        &dir,
        "bindings.json",
        &json!({
            "message": {
                "query_graph": {"nodes": {"n0": {}}, "edges": {}},
                "results": [{"node_bindings": {"n9": [{"id": "X:1"}]}, "analyses": []}]
            }
        }),
    );

    let output = run(&["validate"], &[&input]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("binds unknown query node \"n9\""));
}

#[test]
fn normalize_migrates_legacy_list_graph() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(
        &dir,
        "legacy.json",
        &json!({
            "nodes": [
                {"id": "n0", "curie": "MONDO:0005148", "type": "disease"},
                {"id": "n1", "type": "gene"}
            ],
            "edges": [
                {"id": "e0", "source_id": "n0", "target_id": "n1", "type": "treats"}
            ]
        }),
    );

    let output = run(&["normalize"], &[&input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let graph: Value = serde_json::from_str(&stdout(&output)).expect("normalize prints JSON");
    assert_eq!(graph["nodes"]["n0"]["ids"], json!(["MONDO:0005148"]));
    assert_eq!(graph["nodes"]["n1"]["categories"], json!(["gene"]));
    assert_eq!(graph["edges"]["e0"]["subject"], json!("n0"));
    assert_eq!(graph["edges"]["e0"]["predicates"], json!(["treats"]));
    assert_eq!(graph["nodes"]["n1"]["name"], json!("gene"));
}

#[test]
fn normalize_list_output_names_nodes() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(
        &dir,
        "graph.json",
        &json!({"message": {"query_graph": {"nodes": {"n0": {"ids": ["MONDO:1", "MONDO:2"]}}, "edges": {}}}}),
    );

    let output = run(&["normalize", "--list"], &[&input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let graph: Value = serde_json::from_str(&stdout(&output)).expect("normalize prints JSON");
    assert_eq!(graph["nodes"][0]["id"], json!("n0"));
    assert_eq!(graph["nodes"][0]["name"], json!("MONDO:1, MONDO:2"));

    let output = run(&["normalize", "--list", "--no-names"], &[&input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let graph: Value = serde_json::from_str(&stdout(&output)).expect("normalize prints JSON");
    assert!(graph["nodes"][0].get("name").is_none());
}

#[test]
fn normalize_honors_trapi_version_hint() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(&dir, "graph.json", &json!({"nodes": {"n0": {"id": "X:1"}}, "edges": {}}));

    let detected = run(&["normalize"], &[&input]);
    assert!(detected.status.success(), "stderr: {}", stderr(&detected));
    let graph: Value = serde_json::from_str(&stdout(&detected)).expect("normalize prints JSON");
    assert_eq!(graph["nodes"]["n0"]["ids"], json!(["X:1"]));

    let hinted = run(&["normalize", "--trapi-version", "1.1"], &[&input]);
    assert!(hinted.status.success(), "stderr: {}", stderr(&hinted));
    let graph: Value = serde_json::from_str(&stdout(&hinted)).expect("normalize prints JSON");
    assert!(graph["nodes"]["n0"].get("ids").is_none());
    assert_eq!(graph["nodes"]["n0"]["id"], json!("X:1"));
}

#[test]
fn normalize_rejects_non_list_ids() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(&dir, "bad.json", &json!({"nodes": {"n0": {"ids": 7}}, "edges": {}}));

    let output = run(&["normalize"], &[&input]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("expected array or string"));
}

#[test]
fn order_starts_at_pinned_leaf() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(
        &dir,
        "chain.json",
        &json!({
            "nodes": {"n0": {}, "n1": {}, "n2": {"ids": ["CHEBI:1"]}},
            "edges": {
                "e0": {"subject": "n0", "object": "n1"},
                "e1": {"subject": "n1", "object": "n2"}
            }
        }),
    );

    let output = run(&["order"], &[&input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "n2\nn1\nn0\n");
}

#[test]
fn table_json_sorts_by_averaged_score() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(&dir, "message.json", &scored_message());
    let biolink = write_json(&dir, "biolink.json", &biolink_document());

    let output = run(&["table", "--json", "--biolink"], &[&biolink, &input]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let table: Value = serde_json::from_str(&stdout(&output)).expect("table prints JSON");

    let headers: Vec<&str> = table["columns"]
        .as_array()
        .expect("columns array")
        .iter()
        .filter_map(|c| c["header"].as_str())
        .collect();
    assert_eq!(headers, vec!["MONDO:0005148 (n0)", "Gene (n1)", "Score"]);
    assert_eq!(
        table["rows"],
        json!([
            ["type 2 diabetes mellitus", "INS", "0.750"],
            ["type 2 diabetes mellitus", "PPARG", "0.250"]
        ])
    );
}

#[test]
fn table_rejects_unreadable_config() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_json(&dir, "message.json", &scored_message());
    let config = dir.path().join("style.json");
    fs::write(&config, "{ not json").expect("write config");

    let output = run(&["table", "--config"], &[&config, &input]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid config"));
}

#[test]
fn hierarchy_accepts_biolink_names() {
    let dir = TempDir::new().expect("tempdir");
    let biolink = write_json(&dir, "biolink.json", &biolink_document());

    let output = run(&["hierarchy"], &[&biolink, Path::new("gene")]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "biolink:Gene\nbiolink:NamedThing\n");

    let missing = run(&["hierarchy"], &[&biolink, Path::new("biolink:Protein")]);
    assert!(!missing.status.success());
    assert!(stderr(&missing).contains("unknown Biolink class"));
}

#[test]
fn concepts_and_predicates_from_document() {
    let dir = TempDir::new().expect("tempdir");
    let biolink = write_json(&dir, "biolink.json", &biolink_document());

    let concepts = run(&["concepts"], &[&biolink]);
    assert!(concepts.status.success(), "stderr: {}", stderr(&concepts));
    assert_eq!(
        stdout(&concepts),
        "biolink:NamedThing\nbiolink:Gene\nbiolink:Disease\nbiolink:SmallMolecule\n"
    );

    let predicates = run(&["predicates", "--json"], &[&biolink]);
    assert!(predicates.status.success(), "stderr: {}", stderr(&predicates));
    let list: Value = serde_json::from_str(&stdout(&predicates)).expect("predicates print JSON");
    assert_eq!(
        list,
        json!([
            {"predicate": "biolink:related_to", "domain": "biolink:NamedThing", "range": "biolink:NamedThing"},
            {"predicate": "biolink:treats", "domain": "biolink:SmallMolecule", "range": "biolink:Disease"}
        ])
    );
}
