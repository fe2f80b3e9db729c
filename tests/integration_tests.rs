//! Integration tests for structdiff
//!
//! These tests exercise the public API end to end: the structural walker on
//! user types and JSON documents, the registry, configuration files and the
//! CLI handler.

use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};
use structdiff::{inspect_struct, CompareEngine, Inspect, Report, Side};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone)]
struct Address {
    city: String,
    zip: Option<String>,
}

#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: u32,
}

#[derive(Debug, Clone)]
struct Employee {
    name: String,
    age: u32,
}

#[derive(Debug, Clone)]
struct Customer {
    name: String,
    addr: Address,
    tags: Vec<String>,
    scores: BTreeMap<String, f64>,
}

#[derive(Debug)]
struct Team {
    members: Vec<Arc<Member>>,
}

#[derive(Debug)]
struct Member {
    name: String,
    team: OnceLock<Arc<Team>>,
}

inspect_struct!(Address { city, zip });
inspect_struct!(Person { name, age });
inspect_struct!(Employee { name, age });
inspect_struct!(Customer { name, addr, tags, scores });
inspect_struct!(Team { members });
inspect_struct!(Member { name, team });

fn person(name: &str, age: u32) -> Person {
    Person {
        name: name.to_string(),
        age,
    }
}

fn customer(city: &str) -> Customer {
    Customer {
        name: "Alice".to_string(),
        addr: Address {
            city: city.to_string(),
            zip: None,
        },
        tags: vec!["vip".to_string()],
        scores: BTreeMap::from([("q1".to_string(), 1.5)]),
    }
}

/// A team whose members point back at it.
fn team(names: &[&str]) -> Arc<Team> {
    let members: Vec<Arc<Member>> = names
        .iter()
        .map(|name| {
            Arc::new(Member {
                name: (*name).to_string(),
                team: OnceLock::new(),
            })
        })
        .collect();
    let team = Arc::new(Team {
        members: members.clone(),
    });
    for member in &members {
        let _ = member.team.set(Arc::clone(&team));
    }
    team
}

// ============================================================================
// Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_single_leaf_difference() {
        let engine = CompareEngine::new();
        let report = engine.compare(&person("Alice", 30), &person("Alice", 31));

        let diffs = report.field_diffs().expect("flat field diffs");
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs["age:0"], "30");
        assert_eq!(diffs["age:1"], "31");
    }

    #[test]
    fn test_records_of_different_types() {
        let engine = CompareEngine::new();
        let a = person("Alice", 30);
        let b = Employee {
            name: "Alice".to_string(),
            age: 30,
        };

        let report = engine.compare_dyn(Some(&a), Some(&b));
        let (left, right) = report.type_names().expect("type mismatch");
        assert!(left.ends_with("Person"));
        assert!(right.ends_with("Employee"));
    }

    #[test]
    fn test_nested_record_difference() {
        let engine = CompareEngine::new();
        let report = engine.compare(&customer("X"), &customer("Y"));

        let entries = report.entries().expect("composite");
        assert_eq!(entries.len(), 1);
        let (field, inner) = entries[0].as_nested().expect("nested entry");
        assert_eq!(field, "addr");

        let diffs = inner.field_diffs().expect("city diffs");
        assert_eq!(diffs["city:0"], "X");
        assert_eq!(diffs["city:1"], "Y");
    }

    #[test]
    fn test_text_rendering_of_mixed_report() {
        let engine = CompareEngine::new();
        let mut a = customer("Paris");
        let mut b = customer("Lyon");
        a.name = "Alice".to_string();
        b.name = "Bob".to_string();
        b.addr.zip = Some("69001".to_string());
        let _ = b.scores.insert("q1".to_string(), 2.0);

        let report = engine.compare(&a, &b);
        insta::assert_snapshot!(report.to_string(), @r"
        addr:
          zip:
            null mismatch: left value is absent
          city:0 = Paris
          city:1 = Lyon
        scores:
          q1:0 = 1.5
          q1:1 = 2
        name:0 = Alice
        name:1 = Bob
        ");
        assert_eq!(report.discrepancy_count(), 4);
    }
}

// ============================================================================
// Property Tests (example-based)
// ============================================================================

mod property_tests {
    use super::*;

    #[test]
    fn test_reflexivity() {
        let engine = CompareEngine::new();
        let c = customer("Paris");
        assert_eq!(engine.compare(&c, &c), Report::Equal);
        assert_eq!(engine.compare(&c, &c.clone()), Report::Equal);
    }

    #[test]
    fn test_null_symmetry() {
        let engine = CompareEngine::new();
        let p = person("Alice", 30);

        let left = engine.compare_opt(None, Some(&p));
        let right = engine.compare_opt(Some(&p), None);
        assert_eq!(left.null_position(), Some(Side::Left));
        assert_eq!(right.null_position(), Some(Side::Right));
    }

    #[test]
    fn test_field_diff_completeness() {
        let engine = CompareEngine::new();
        let report = engine.compare(&person("Alice", 30), &person("Bob", 31));

        let diffs = report.field_diffs().expect("flat field diffs");
        let keys: Vec<&str> = diffs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name:0", "name:1", "age:0", "age:1"]);
    }

    #[test]
    fn test_comparator_precedence() {
        let mut engine = CompareEngine::new();
        engine.register::<Address, _>(|a, b| a.city.len() == b.city.len());

        let (lyon, nice, paris) = (customer("Lyon"), customer("Nice"), customer("Paris"));

        // Same length cities: the comparator wins over structural recursion
        assert_eq!(engine.compare(&lyon, &nice), Report::Equal);

        let report = engine.compare(&lyon, &paris);
        let diffs = report.field_diffs().expect("comparator diff");
        assert!(diffs["addr:0"].contains("Lyon"));
        assert!(diffs["addr:1"].contains("Paris"));
    }

    #[test]
    fn test_ignore_enforcement() {
        let mut engine = CompareEngine::new();
        engine.ignore::<Address>().ignore::<Vec<String>>();

        let mut b = customer("Lyon");
        b.tags.push("new".to_string());
        assert_eq!(engine.compare(&customer("Paris"), &b), Report::Equal);
    }

    #[test]
    fn test_idempotence_under_caching() {
        let engine = CompareEngine::new();
        let a = customer("Paris");
        let b = customer("Lyon");

        let first = engine.compare(&a, &b);
        let second = engine.compare(&a, &b);
        assert_eq!(first, second);
        assert!(engine.cache_stats().hits >= 1);
    }
}

// ============================================================================
// Graph Tests
// ============================================================================

mod graph_tests {
    use super::*;
    use structdiff::{CompareConfig, CyclePolicy};

    #[test]
    fn test_back_references_terminate() {
        let engine = CompareEngine::new();
        let a = team(&["ann", "bob"]);
        let b = team(&["ann", "bob"]);
        assert_eq!(engine.compare(&a, &b), Report::Equal);
    }

    #[test]
    fn test_difference_behind_back_reference() {
        let engine = CompareEngine::new();
        let a = team(&["ann", "bob"]);
        let b = team(&["ann", "rob"]);

        let report = engine.compare(&a, &b);
        let members = report.find_nested("members").expect("members differ");
        let second = members.find_nested("1").expect("second member differs");
        let diffs = second.field_diffs().expect("name diff");
        assert_eq!(diffs["name:0"], "bob");
        assert_eq!(diffs["name:1"], "rob");
    }

    #[test]
    fn test_cycle_report_policy_marks_revisits() {
        let engine = CompareEngine::with_config(CompareConfig {
            cycle_policy: CyclePolicy::Report,
            ..CompareConfig::default()
        });
        let report = engine.compare(&team(&["ann"]), &team(&["ann"]));

        let member = report
            .find_nested("members")
            .and_then(|r| r.find_nested("0"))
            .expect("member entry");
        assert_eq!(member.find_nested("team"), Some(&Report::CycleDetected));
    }

    #[test]
    fn test_shared_engine_across_threads() {
        let engine = CompareEngine::new();
        let pairs: Vec<(Arc<Team>, Arc<Team>)> = (0..8)
            .map(|i| {
                let other = if i % 2 == 0 { "bob" } else { "rob" };
                (team(&["ann", "bob"]), team(&["ann", other]))
            })
            .collect();

        let engine = &engine;
        let results: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = pairs
                .iter()
                .map(|(a, b)| scope.spawn(move || engine.compare(a, b).is_equal()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("thread completes"))
                .collect()
        });

        let expected: Vec<bool> = (0..8).map(|i| i % 2 == 0).collect();
        assert_eq!(results, expected);
    }
}

// ============================================================================
// Collection and Document Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_hash_maps_compare_by_key() {
        let engine = CompareEngine::new();
        let a: HashMap<&str, u32> = HashMap::from([("x", 1), ("y", 2)]);
        let b: HashMap<&str, u32> = HashMap::from([("y", 2), ("x", 1), ("z", 3)]);

        let report = engine.compare(&a, &b);
        assert_eq!(
            report.find_nested("z"),
            Some(&Report::NullMismatch {
                position: Side::Left
            })
        );
        assert_eq!(report.discrepancy_count(), 1);
    }

    #[test]
    fn test_json_null_is_absence() {
        let engine = CompareEngine::new();
        let a = json!({"name": "Alice", "nickname": null});
        let b = json!({"name": "Alice"});
        assert_eq!(engine.compare(&a, &b), Report::Equal);

        let c = json!({"name": "Alice", "nickname": "Al"});
        assert_eq!(
            engine.compare(&a, &c).find_nested("nickname"),
            Some(&Report::NullMismatch {
                position: Side::Left
            })
        );
    }

    #[test]
    fn test_json_kind_change_is_type_mismatch() {
        let engine = CompareEngine::new();
        let a = json!({"items": [1, 2]});
        let b = json!({"items": {"0": 1, "1": 2}});

        let report = engine.compare(&a, &b);
        let items = report.find_nested("items").expect("items differ");
        assert!(items.type_names().is_some());
    }

    #[test]
    fn test_report_serializes_as_tagged_json() {
        let engine = CompareEngine::new();
        let report = engine.compare(&json!({"a": {"b": 1}}), &json!({"a": {"b": 2}}));

        let value = serde_json::to_value(&report).expect("serializes");
        assert_eq!(value["kind"], "composite");
        assert_eq!(value["entries"][0]["kind"], "nested");
        assert_eq!(value["entries"][0]["field"], "a");
        assert_eq!(value["entries"][0]["report"]["diffs"]["b:1"], "2");
    }

    #[test]
    fn test_custom_inspect_for_trait_objects() {
        let engine = CompareEngine::new();
        let a: Vec<Box<dyn Inspect>> = vec![Box::new(1u8), Box::new("x".to_string())];
        let b: Vec<Box<dyn Inspect>> = vec![Box::new(1u8), Box::new(2u8)];

        let report = engine.compare(&a, &b);
        let second = report.find_nested("1").expect("second element");
        assert!(second.type_names().is_some());
    }
}

// ============================================================================
// CLI Tests
// ============================================================================

mod cli_tests {
    use structdiff::cli::{exit_codes, run_compare, CompareJob};
    use structdiff::config::{load_config_file, AppConfig, OutputFormat};
    use tempfile::TempDir;

    #[test]
    fn test_compare_yaml_against_json() {
        let tmp = TempDir::new().unwrap();
        let left = tmp.path().join("left.yaml");
        let right = tmp.path().join("right.json");
        let out = tmp.path().join("report.json");
        std::fs::write(&left, "name: Alice\naddr:\n  city: X\n").unwrap();
        std::fs::write(&right, r#"{"name": "Alice", "addr": {"city": "Y"}}"#).unwrap();

        let config = AppConfig::builder()
            .output_format(OutputFormat::Json)
            .output_file(Some(out.clone()))
            .build();
        let code = run_compare(CompareJob::new(left, right, config)).unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["entries"][0]["field"], "addr");
        assert_eq!(written["entries"][0]["report"]["diffs"]["city:0"], "X");
    }

    #[test]
    fn test_config_file_drives_engine() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".structdiff.yaml");
        std::fs::write(
            &config_path,
            "compare:\n  builtin_comparators: false\noutput:\n  format: text\n",
        )
        .unwrap();

        let left = tmp.path().join("a.json");
        let right = tmp.path().join("b.json");
        std::fs::write(&left, r#"{"n": 1}"#).unwrap();
        std::fs::write(&right, r#"{"n": 2}"#).unwrap();

        let mut config = load_config_file(&config_path).unwrap();
        config.output.file = Some(tmp.path().join("out.txt"));

        // Without leaf comparators only the shape is compared
        let code = run_compare(CompareJob::new(left, right, config)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_scalar_documents() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.txt");
        let run = |left_text: &str, right_text: &str| {
            let left = tmp.path().join("left.json");
            let right = tmp.path().join("right.json");
            std::fs::write(&left, left_text).unwrap();
            std::fs::write(&right, right_text).unwrap();
            let config = AppConfig::builder().output_file(Some(out.clone())).build();
            run_compare(CompareJob::new(left, right, config)).unwrap()
        };

        assert_eq!(run("1", "2"), exit_codes::CHANGES_DETECTED);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap().trim_end(),
            "value mismatch: 1 vs 2"
        );
        assert_eq!(run(r#""x""#, r#""y""#), exit_codes::CHANGES_DETECTED);
        assert_eq!(run("true", "true"), exit_codes::SUCCESS);
    }
}
