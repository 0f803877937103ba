use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

fn tollway() -> Command {
    cargo_bin_cmd!("tollway")
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, value.to_string()).unwrap();
    path
}

/// Three tolls on a straight motorway, the last one placed by coordinates
fn fixtures() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let overpass = write_json(
        dir.path(),
        "overpass.json",
        &json!({
            "elements": [
                { "type": "node", "id": 1, "lat": 45.0, "lon": 6.00 },
                { "type": "node", "id": 2, "lat": 45.0, "lon": 6.05 },
                { "type": "node", "id": 3, "lat": 45.0, "lon": 6.10 },
                { "type": "node", "id": 4, "lat": 45.0, "lon": 6.15 },
                { "type": "way", "id": 100, "nodes": [1, 2],
                  "tags": { "highway": "motorway", "ref": "A43" } },
                { "type": "way", "id": 200, "nodes": [2, 3, 4],
                  "tags": { "highway": "motorway", "ref": "A43" } }
            ]
        }),
    );
    let price = write_json(
        dir.path(),
        "price.json",
        &json!({
            "date": "01/02/2025",
            "name": "price_format",
            "toll_description": {
                "AITON": { "node_id": [1] },
                "CHIGNIN": { "node_id": [], "lat": 45.0, "lon": 6.149 },
                "GHOST": {}
            },
            "networks": [{
                "network_name": "network_1",
                "connection": {
                    "AITON": {
                        "CHIGNIN": {
                            "distance": "11,8",
                            "price": { "class_1": "4,20", "class_2": "6.40" }
                        },
                        "GHOST": { "distance": "3", "price": { "class_1": "1" } }
                    },
                    "CHIGNIN": {
                        "AITON": { "distance": "11,8", "price": { "class_1": "4,20" } }
                    }
                }
            }]
        }),
    );
    (dir, price, overpass)
}

#[test]
fn annotate_writes_enriched_document_and_stats() {
    let (dir, price, overpass) = fixtures();
    let out = dir.path().join("out.json");
    let stats = dir.path().join("stats.csv");

    tollway()
        .arg("annotate")
        .arg("--price")
        .arg(&price)
        .arg("--overpass")
        .arg(&overpass)
        .arg("--out")
        .arg(&out)
        .arg("--stats-csv")
        .arg(&stats)
        .assert()
        .success();

    let enriched: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(enriched["name"], "price_format");
    let connections = &enriched["networks"][0]["connection"];
    assert_eq!(connections["AITON"]["CHIGNIN"]["by_ways"], json!(["100", "200"]));
    assert_eq!(connections["AITON"]["GHOST"]["by_ways"], json!([]));
    assert_eq!(
        connections["AITON"]["GHOST"]["_note"],
        "OSM node not found for destination toll"
    );
    assert_eq!(connections["AITON"]["GHOST"]["_reason"], "unresolvable_destination");
    assert!(connections["AITON"]["CHIGNIN"].get("_reason").is_none());
    // motorways are one-way, nothing leads back to AITON
    assert_eq!(
        connections["CHIGNIN"]["AITON"]["_note"],
        "No path found between toll OSM nodes"
    );
    assert_eq!(connections["CHIGNIN"]["AITON"]["_reason"], "no_path");
    assert_eq!(enriched["by_way"]["100"]["relation"][0]["from"], "AITON");

    let csv = fs::read_to_string(&stats).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("way_id,length_km,class_1_count,class_1_sum"));
    assert!(lines.next().unwrap().starts_with("100,"));
    assert!(lines.next().unwrap().starts_with("200,"));
    assert!(lines.next().is_none());
}

#[test]
fn parallel_collapsed_run_gives_same_summary() {
    let (dir, price, overpass) = fixtures();
    let sequential = dir.path().join("sequential.json");
    let parallel = dir.path().join("parallel.json");

    let runs: [(&PathBuf, &[&str]); 2] = [
        (&sequential, &[]),
        (&parallel, &["--parallel", "--strategy", "collapsed"]),
    ];
    for (out, extra) in runs {
        tollway()
            .arg("annotate")
            .arg("--price")
            .arg(&price)
            .arg("--overpass")
            .arg(&overpass)
            .arg("--out")
            .arg(out)
            .args(extra)
            .assert()
            .success();
    }

    let read = |path: &Path| -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    };
    assert_eq!(read(&sequential)["by_way"], read(&parallel)["by_way"]);
}

#[test]
fn summary_from_annotated_document() {
    let (dir, price, overpass) = fixtures();
    let out = dir.path().join("out.json");
    let summary = dir.path().join("summary.csv");

    tollway()
        .args(["annotate", "--price"])
        .arg(&price)
        .arg("--overpass")
        .arg(&overpass)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    tollway()
        .args(["summary", "--json"])
        .arg(&out)
        .arg("--out")
        .arg(&summary)
        .assert()
        .success();

    let csv = fs::read_to_string(&summary).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "way_id,length_km,class_1_mean_per_km,class_2_mean_per_km"
    );
    assert!(lines.next().unwrap().starts_with("100,3.931,"));
    assert!(lines.next().unwrap().starts_with("200,7.863,"));
}

#[test]
fn connections_csv_is_semicolon_separated() {
    let (dir, price, overpass) = fixtures();
    let csv = dir.path().join("connections.csv");

    tollway()
        .args(["connections", "--price"])
        .arg(&price)
        .arg("--overpass")
        .arg(&overpass)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success();

    let text = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "name_from;name_to;by_way;distance;class_1;class_2");
    assert_eq!(lines[1], "AITON;CHIGNIN;100,200;11,8;4,20;6.40");
    assert_eq!(lines[2], "AITON;GHOST;;3;1;");
    assert_eq!(lines[3], "CHIGNIN;AITON;;11,8;4,20;");
}

#[test]
fn geojson_export() {
    let (dir, _, overpass) = fixtures();
    let out = dir.path().join("network.geojson");

    tollway()
        .args(["geojson", "--overpass"])
        .arg(&overpass)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let collection: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(collection["type"], "FeatureCollection");
    let features = collection["features"].as_array().unwrap();
    assert_eq!(features.len(), 6);
    assert_eq!(features[4]["properties"]["ref"], "A43");
}

#[test]
fn config_file_is_applied() {
    let (dir, price, overpass) = fixtures();
    let config = dir.path().join("tollway.toml");
    fs::write(&config, "[attribution]\nstrategy = \"collapsed\"\nvariance = \"sample\"\n").unwrap();

    tollway()
        .arg("--config")
        .arg(&config)
        .args(["annotate", "--price"])
        .arg(&price)
        .arg("--overpass")
        .arg(&overpass)
        .arg("--out")
        .arg(dir.path().join("out.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("collapsed strategy"));
}

#[test]
fn invalid_config_fails() {
    let (dir, price, overpass) = fixtures();
    let config = dir.path().join("tollway.toml");
    fs::write(&config, "[attribution]\nstrategy = \"fastest\"\n").unwrap();

    tollway()
        .arg("--config")
        .arg(&config)
        .args(["annotate", "--price"])
        .arg(&price)
        .arg("--overpass")
        .arg(&overpass)
        .arg("--out")
        .arg(dir.path().join("out.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings"));
}

#[test]
fn missing_input_fails_with_context() {
    let dir = tempdir().unwrap();

    tollway()
        .args(["annotate", "--price", "missing.json", "--overpass", "missing.json", "--out"])
        .arg(dir.path().join("out.json"))
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load input data"));
}

#[test]
fn unknown_strategy_is_rejected() {
    let (dir, price, overpass) = fixtures();

    tollway()
        .args(["annotate", "--strategy", "fastest", "--price"])
        .arg(&price)
        .arg("--overpass")
        .arg(&overpass)
        .arg("--out")
        .arg(dir.path().join("out.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown search strategy"));
}
