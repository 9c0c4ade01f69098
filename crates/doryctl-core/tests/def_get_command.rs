mod support;

use serde_json::{Value, json};

use doryctl_core::commands::{DefGetCommand, DefGetOptions};
use doryctl_core::document::Document;
use doryctl_core::error::{EngineError, ValidationError};
use doryctl_core::kind::Kind;

use support::{FixtureProvider, document, project_json};

fn item_names(items: &[Value], field: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| item[field].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Names `got` must be requested, appear in `source` order, and never
/// outnumber the distinct requested names.
fn assert_filtered(source: &[&str], got: &[String], requested: &[&str]) {
    let mut distinct = requested.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    assert!(got.len() <= distinct.len(), "{got:?} vs {requested:?}");

    let mut last = None;
    for name in got {
        assert!(requested.contains(&name.as_str()), "{name} was not requested");
        let position = source.iter().position(|s| s == name);
        assert!(position.is_some(), "{name} is not in the source");
        assert!(position > last, "{got:?} is out of source order");
        last = position;
    }
}

fn filtered_names(options: DefGetOptions, requested: &[&str], field: &str) -> Vec<String> {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(&options.with_modules(requested.iter().copied()))
        .unwrap();
    let names = item_names(&report.projection.envelope.items, field);
    let first_column: Vec<String> = report.projection.rows.iter().map(|r| r[0].clone()).collect();
    assert_eq!(names, first_column);
    names
}

#[test]
fn build_filter_keeps_only_requested_module() {
    let provider = FixtureProvider::new(document());
    let command = DefGetCommand::new(&provider);

    let report = command
        .execute(&DefGetOptions::new("test-project1", "build").with_modules(["svc-b"]))
        .unwrap();

    let envelope = &report.projection.envelope;
    assert_eq!(envelope.kind, "buildDefs");
    assert_eq!(item_names(&envelope.items, "buildName"), vec!["svc-b"]);
    assert_eq!(
        report.projection.rows,
        vec![vec![
            "svc-b".to_string(),
            "golang-1.17".to_string(),
            "svc-b".to_string(),
            "2".to_string(),
            "go build".to_string(),
        ]]
    );

    let table = report.render().unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[1].starts_with("svc-b"));
}

#[test]
fn deploy_row_formats_ports_and_depends() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "deploy").with_env("test"))
        .unwrap();

    assert_eq!(
        report.projection.rows[0],
        vec!["svc-a", "pkg-a", "2", "8080/TCP", "mysql:3306"]
    );
    assert_eq!(
        report
            .projection
            .envelope
            .metadata
            .labels
            .get("envName")
            .map(String::as_str),
        Some("test")
    );

    let table = report.render().unwrap();
    let first_row: Vec<&str> = table
        .lines()
        .nth(1)
        .unwrap()
        .split('\t')
        .map(str::trim_end)
        .collect();
    assert_eq!(first_row, vec!["svc-a", "pkg-a", "2", "8080/TCP", "mysql:3306"]);
}

#[test]
fn empty_filter_returns_every_item_in_source_order() {
    let provider = FixtureProvider::new(document());
    let command = DefGetCommand::new(&provider);

    let report = command
        .execute(&DefGetOptions::new("test-project1", "build"))
        .unwrap();
    assert_eq!(
        item_names(&report.projection.envelope.items, "buildName"),
        vec!["svc-a", "svc-b", "svc-c"]
    );

    let report = command
        .execute(&DefGetOptions::new("test-project1", "ignore"))
        .unwrap();
    assert_eq!(report.projection.envelope.items.len(), 2);
}

#[test]
fn filter_order_never_changes_result_order() {
    let provider = FixtureProvider::new(document());
    let command = DefGetCommand::new(&provider);

    let permutations = [
        ["svc-a", "svc-b", "svc-c"],
        ["svc-c", "svc-a", "svc-b"],
        ["svc-b", "svc-c", "svc-a"],
    ];
    for names in permutations {
        let report = command
            .execute(&DefGetOptions::new("test-project1", "build").with_modules(names))
            .unwrap();
        assert_eq!(
            item_names(&report.projection.envelope.items, "buildName"),
            vec!["svc-a", "svc-b", "svc-c"]
        );
    }
}

#[test]
fn unmatched_module_names_are_ignored() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(
            &DefGetOptions::new("test-project1", "build").with_modules(["svc-a", "svc-x", "svc-a"]),
        )
        .unwrap();

    let names = item_names(&report.projection.envelope.items, "buildName");
    assert_eq!(names, vec!["svc-a"]);
}

#[test]
fn missing_branch_is_not_found() {
    let provider = FixtureProvider::new(document());
    let err = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "pipeline").with_branch("develop"))
        .unwrap_err();

    assert!(matches!(err, EngineError::NotFound { .. }));
    assert_eq!(err.to_string(), "branchName develop not exists");
}

#[test]
fn missing_env_is_not_found() {
    let provider = FixtureProvider::new(document());
    let err = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "deploy").with_env("prod"))
        .unwrap_err();

    assert_eq!(err.to_string(), "envName prod not exists");
}

#[test]
fn pipeline_labels_carry_branch_context() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "pipeline").with_branch("master"))
        .unwrap();

    let labels = &report.projection.envelope.metadata.labels;
    assert_eq!(labels.get("branchName").map(String::as_str), Some("master"));
    assert_eq!(labels.get("envs").map(String::as_str), Some("test"));
    assert_eq!(labels.get("envProductions").map(String::as_str), Some("prod"));
    assert_eq!(
        report.projection.rows[0],
        vec!["master", "test", "prod", "true", "false", "svc-a: true\nsvc-b: false"]
    );
}

#[test]
fn env_step_reports_its_own_error() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(
            &DefGetOptions::new("test-project1", "step")
                .with_step("testApi")
                .with_env("test"),
        )
        .unwrap();

    assert_eq!(report.definition_error(), Some("testApi svc-c not exists"));
    assert_eq!(report.projection.rows[0][1], "on");
    assert_eq!(report.projection.rows[0][2], "svc-a");
}

#[test]
fn package_error_does_not_hide_items() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "package").with_output("json"))
        .unwrap();

    assert_eq!(
        report.definition_error(),
        Some("packageDefs[0] relatedBuilds svc-x not exists")
    );
    let rendered: Value = serde_json::from_str(&report.render().unwrap()).unwrap();
    assert_eq!(rendered["items"][0]["packageName"], "pkg-a");
    assert_eq!(
        rendered["errMsg"],
        "packageDefs[0] relatedBuilds svc-x not exists"
    );
}

#[test]
fn json_and_yaml_render_the_same_envelope() {
    let provider = FixtureProvider::new(document());
    let command = DefGetCommand::new(&provider);

    for (kind, options) in [
        (Kind::Build, DefGetOptions::new("test-project1", "build")),
        (Kind::Deploy, DefGetOptions::new("test-project1", "deploy").with_env("test")),
        (Kind::Steps, DefGetOptions::new("test-project1", "steps")),
    ] {
        let json = command
            .execute(&options.clone().with_output("json"))
            .unwrap()
            .render()
            .unwrap();
        let yaml = command
            .execute(&options.with_output("yaml"))
            .unwrap()
            .render()
            .unwrap();

        let from_json: Value = serde_json::from_str(&json).unwrap();
        let from_yaml: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(from_json, from_yaml, "kind {kind}");
        assert_eq!(from_json["kind"], kind.tag());
    }
}

#[test]
fn pruned_output_drops_empty_fields() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "build").with_output("json"))
        .unwrap();

    let rendered: Value = serde_json::from_str(&report.render().unwrap()).unwrap();
    let svc_c = &rendered["items"][2];
    assert_eq!(svc_c["buildName"], "svc-c");
    assert!(svc_c.get("buildCmds").is_none());
    assert!(rendered.get("errMsg").is_none());
    assert!(rendered["metadata"].get("labels").is_none());
}

#[test]
fn validation_failures_never_reach_the_provider() {
    let provider = FixtureProvider::new(document());
    let command = DefGetCommand::new(&provider);

    let invalid = [
        DefGetOptions::new("", "build"),
        DefGetOptions::new("test-project1", "builds"),
        DefGetOptions::new("Test_Project", "build"),
        DefGetOptions::new("test-project1", "deploy"),
        DefGetOptions::new("test-project1", "pipeline"),
        DefGetOptions::new("test-project1", "step").with_env("test"),
        DefGetOptions::new("test-project1", "build").with_modules(["svc--a"]),
        DefGetOptions::new("test-project1", "build").with_output("xml"),
    ];
    for options in &invalid {
        let err = command.execute(options).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }
    assert_eq!(provider.calls(), 0);
}

#[test]
fn unknown_kind_lists_every_kind() {
    let provider = FixtureProvider::new(document());
    let err = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "images"))
        .unwrap_err();

    match err {
        EngineError::Validation(ValidationError::UnknownKind { expected, .. }) => {
            for kind in Kind::ALL {
                assert!(expected.contains(kind.as_str()));
            }
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn package_filter_matches_package_name_in_source_order() {
    let source = ["pkg-a", "pkg-b", "pkg-c"];
    let cases: [(&[&str], &[&str]); 4] = [
        (&["pkg-c", "pkg-a"], &["pkg-a", "pkg-c"]),
        (&["pkg-b", "pkg-x", "pkg-b"], &["pkg-b"]),
        (&["pkg-c", "pkg-b", "pkg-a"], &["pkg-a", "pkg-b", "pkg-c"]),
        (&["alpine", "svc-a"], &[]),
    ];
    for (requested, expected) in cases {
        let got = filtered_names(
            DefGetOptions::new("test-project1", "package"),
            requested,
            "packageName",
        );
        assert_filtered(&source, &got, requested);
        assert_eq!(got, expected, "requested {requested:?}");
    }
}

#[test]
fn deploy_filter_matches_deploy_name_in_source_order() {
    let source = ["svc-a", "svc-b", "svc-c"];
    let cases: [(&[&str], &[&str]); 3] = [
        (&["svc-c", "svc-a"], &["svc-a", "svc-c"]),
        (&["svc-x", "svc-b", "svc-b"], &["svc-b"]),
        (&["pkg-a"], &[]),
    ];
    for (requested, expected) in cases {
        let got = filtered_names(
            DefGetOptions::new("test-project1", "deploy").with_env("test"),
            requested,
            "deployName",
        );
        assert_filtered(&source, &got, requested);
        assert_eq!(got, expected, "requested {requested:?}");
    }
}

#[test]
fn ops_filter_matches_ops_name_in_source_order() {
    let source = ["release", "hotfix", "scan"];
    let cases: [(&[&str], &[&str]); 3] = [
        (&["scan", "release", "rollback"], &["release", "scan"]),
        (&["hotfix", "hotfix"], &["hotfix"]),
        (&["scan", "hotfix", "release"], &["release", "hotfix", "scan"]),
    ];
    for (requested, expected) in cases {
        let got = filtered_names(
            DefGetOptions::new("test-project1", "ops"),
            requested,
            "customOpsName",
        );
        assert_filtered(&source, &got, requested);
        assert_eq!(got, expected, "requested {requested:?}");
    }
}

#[test]
fn step_filter_matches_module_name_in_source_order() {
    let source = ["svc-a", "svc-b", "svc-c"];
    let cases: [(&[&str], &[&str]); 3] = [
        (&["svc-c", "svc-a"], &["svc-a", "svc-c"]),
        (&["svc-b", "svc-x"], &["svc-b"]),
        (&["scan-code"], &[]),
    ];
    for (requested, expected) in cases {
        let got = filtered_names(
            DefGetOptions::new("test-project1", "step").with_step("scanCode"),
            requested,
            "moduleName",
        );
        assert_filtered(&source, &got, requested);
        assert_eq!(got, expected, "requested {requested:?}");
    }
}

#[test]
fn package_table_still_prints_rows_when_error_is_set() {
    let provider = FixtureProvider::new(document());
    let report = DefGetCommand::new(&provider)
        .execute(&DefGetOptions::new("test-project1", "package"))
        .unwrap();

    assert_eq!(
        report.definition_error(),
        Some("packageDefs[0] relatedBuilds svc-x not exists")
    );

    let table = report.render().unwrap();
    let lines: Vec<Vec<&str>> = table
        .lines()
        .map(|line| line.split('\t').map(str::trim_end).collect())
        .collect();
    assert_eq!(lines.len(), 4, "{table}");
    assert_eq!(lines[0], vec!["NAME", "BUILDS", "FROM", "DOCKERFILE"]);
    assert_eq!(lines[1], vec!["pkg-a", "svc-a", "openjdk:8", "target/*.jar"]);
    assert_eq!(lines[2][0], "pkg-b");
    assert_eq!(lines[3][0], "pkg-c");
    assert!(!table.contains("not exists"));
}

#[test]
fn falsy_sequence_elements_survive_rendering() {
    let mut project = project_json();
    let svc_a = &mut project["projectDef"]["buildDefs"][0];
    svc_a["buildCmds"] = json!(["make", "", "make test"]);
    svc_a["retryDelays"] = json!([0, 5]);
    svc_a["flags"] = json!([true, false]);
    let document: Document = serde_json::from_value(project).unwrap();
    let provider = FixtureProvider::new(document);
    let command = DefGetCommand::new(&provider);
    let options = DefGetOptions::new("test-project1", "build").with_modules(["svc-a"]);

    let json = command
        .execute(&options.clone().with_output("json"))
        .unwrap()
        .render()
        .unwrap();
    let rendered: Value = serde_json::from_str(&json).unwrap();
    let item = &rendered["items"][0];
    assert_eq!(item["buildCmds"], json!(["make", "", "make test"]));
    assert_eq!(item["retryDelays"], json!([0, 5]));
    assert_eq!(item["flags"], json!([true, false]));

    let table = command.execute(&options).unwrap().render().unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 4, "{table}");
    assert!(lines[1].trim_end().ends_with("\tmake"));
    assert_eq!(lines[2].trim(), "");
    assert!(lines[3].trim_end().ends_with("\tmake test"));
}
