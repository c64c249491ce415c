//! End-to-end tests driving the CLI container against a temporary data dir.

use tempfile::tempdir;
use votecheck::connector::api::{Container, ContainerConfig, Router};
use votecheck::{Commands, OutputFormat};

const DATASET: &str = r#"{
    "survey_groups": [
        {"id": 1, "name": "Council", "description": "City council", "restrict_voting": true},
        {"id": 2, "name": "Open polls", "restrict_voting": false}
    ],
    "surveys": [
        {"id": 10, "title": "Budget", "survey_group_id": 1},
        {"id": 20, "title": "Lunch", "survey_group_id": 2}
    ],
    "questions": [
        {"id": 100, "survey_id": 10, "text": "Approve?"},
        {"id": 200, "survey_id": 20, "text": "Pasta?"}
    ],
    "votes": [
        {"id": 1, "question_id": 100, "fingerprint": "abc"},
        {"id": 2, "question_id": 200, "fingerprint": "abc"}
    ]
}"#;

fn seeded_data_dir() -> tempfile::TempDir {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("dataset.json");
    std::fs::write(&file, DATASET).expect("write dataset");
    dir
}

async fn run(data_dir: &str, command: Commands) -> anyhow::Result<String> {
    let container = Container::new(ContainerConfig {
        data_dir: data_dir.to_string(),
        read_only: command.is_read_only(),
    })?;
    Router::new(&container).route(command).await
}

async fn import(dir: &tempfile::TempDir) -> String {
    let data_dir = dir.path().join("data");
    let data_dir = data_dir.to_str().expect("utf-8 path").to_string();
    run(
        &data_dir,
        Commands::Import {
            file: dir.path().join("dataset.json"),
        },
    )
    .await
    .expect("import");
    data_dir
}

#[tokio::test]
async fn test_import_reports_row_counts() {
    let dir = seeded_data_dir();
    let data_dir = dir.path().join("data");
    let output = run(
        data_dir.to_str().unwrap(),
        Commands::Import {
            file: dir.path().join("dataset.json"),
        },
    )
    .await
    .expect("import");

    assert!(output.starts_with("Imported 8 rows"));
}

#[tokio::test]
async fn test_check_reports_voted_survey() {
    let dir = seeded_data_dir();
    let data_dir = import(&dir).await;

    let output = run(
        &data_dir,
        Commands::Check {
            group_id: 1,
            fingerprint: "abc".to_string(),
            format: OutputFormat::Text,
        },
    )
    .await
    .expect("check");

    assert!(output.contains("already voted"));
    assert!(output.contains("Budget"));
}

#[tokio::test]
async fn test_check_json_for_new_voter() {
    let dir = seeded_data_dir();
    let data_dir = import(&dir).await;

    let output = run(
        &data_dir,
        Commands::Check {
            group_id: 1,
            fingerprint: "xyz".to_string(),
            format: OutputFormat::Json,
        },
    )
    .await
    .expect("check");

    let status: serde_json::Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(status["already_voted"], false);
    assert!(status["voted_survey"].is_null());
}

#[tokio::test]
async fn test_check_unrestricted_group_allows_revote() {
    let dir = seeded_data_dir();
    let data_dir = import(&dir).await;

    let output = run(
        &data_dir,
        Commands::Check {
            group_id: 2,
            fingerprint: "abc".to_string(),
            format: OutputFormat::Text,
        },
    )
    .await
    .expect("check");

    assert!(output.contains("does not restrict voting"));
}

#[tokio::test]
async fn test_check_unknown_group_fails() {
    let dir = seeded_data_dir();
    let data_dir = import(&dir).await;

    let err = run(
        &data_dir,
        Commands::Check {
            group_id: 99,
            fingerprint: "abc".to_string(),
            format: OutputFormat::Text,
        },
    )
    .await
    .unwrap_err();

    let domain = err
        .downcast_ref::<votecheck::DomainError>()
        .expect("domain error");
    assert!(domain.is_not_found());
}

#[tokio::test]
async fn test_groups_and_surveys_listing() {
    let dir = seeded_data_dir();
    let data_dir = import(&dir).await;

    let groups = run(
        &data_dir,
        Commands::Groups {
            format: OutputFormat::Text,
        },
    )
    .await
    .expect("groups");
    assert!(groups.contains("Council (1, one survey per voter)"));
    assert!(groups.contains("Open polls (2, unrestricted)"));

    let surveys = run(
        &data_dir,
        Commands::Surveys {
            group_id: 1,
            format: OutputFormat::Text,
        },
    )
    .await
    .expect("surveys");
    assert!(surveys.contains("10. Budget"));
    assert!(!surveys.contains("Lunch"));
}

#[tokio::test]
async fn test_read_command_without_database_fails() {
    let dir = tempdir().expect("tempdir");

    let res = run(
        dir.path().to_str().unwrap(),
        Commands::Groups {
            format: OutputFormat::Json,
        },
    )
    .await;

    assert!(res.is_err());
}

#[tokio::test]
async fn test_init_creates_empty_store() {
    let dir = tempdir().expect("tempdir");
    let data_dir = dir.path().join("fresh");
    let data_dir = data_dir.to_str().unwrap();

    let output = run(data_dir, Commands::Init).await.expect("init");
    assert!(output.contains("votecheck.duckdb"));

    let groups = run(
        data_dir,
        Commands::Groups {
            format: OutputFormat::Text,
        },
    )
    .await
    .expect("groups");
    assert_eq!(groups, "No survey groups.");
}
