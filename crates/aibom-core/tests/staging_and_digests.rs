// [crates/aibom-core/tests/staging_and_digests.rs]
use aibom_core::{Artifact, ArtifactDigest, ArtifactRole, DatasetDefinition, DomainError, FitParams, Job, JobState, StagingLayout};

#[test]
fn job_round_trips_through_json_with_documented_field_names() {
    let job = Job::new("task-123", "owner-a", "3e5c1a2b-uuid");
    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["job_id"], "task-123");
    assert_eq!(json["owner_id"], "owner-a");
    assert_eq!(json["staging_dir"], "3e5c1a2b-uuid");

    let restored: Job = serde_json::from_value(json).unwrap();
    assert_eq!(restored, job);
}

#[test]
fn job_state_round_trips_all_four_variants() {
    for state in [JobState::Pending, JobState::Running, JobState::Succeeded, JobState::Failed] {
        let json = serde_json::to_string(&state).unwrap();
        let parsed: JobState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_str(), state.as_str());
    }
}

#[test]
fn staging_layout_paths_agree_with_digest_map_keys() {
    let layout = StagingLayout::new("job-xyz");
    let artifacts = vec![
        Artifact::new(layout.model_path("model.keras"), ArtifactRole::Material, ArtifactDigest::new("11")),
        Artifact::new(layout.dataset_path("data.csv"), ArtifactRole::Material, ArtifactDigest::new("22")),
        Artifact::new(layout.trained_model_path("keras"), ArtifactRole::Product, ArtifactDigest::new("33")),
    ];
    let (materials, products) = aibom_core::artifact::partition_digests(&artifacts);
    assert!(materials.contains_key(&layout.model_path("model.keras")));
    assert!(products.contains_key(&layout.trained_model_path("keras")));
}

#[test]
fn csv_definition_excludes_label_from_feature_columns() {
    let yaml = r#"
type: csv
input_shape: [11]
output_shape: [6]
label: quality
columns:
  alcohol: float
  quality: int
  ph: float
"#;
    let def: DatasetDefinition = serde_yaml::from_str(yaml).unwrap();
    let mut features = def.csv_feature_columns();
    features.sort();
    assert_eq!(features, vec!["alcohol", "ph"]);
}

#[test]
fn fit_params_absent_from_json_fall_back_to_documented_defaults() {
    let params: FitParams = serde_json::from_str("{}").unwrap();
    assert_eq!(params, FitParams::default());
}

#[test]
fn domain_error_client_variants_map_to_documented_status_codes() {
    assert_eq!(DomainError::InvalidInput("bad zip".into()).status_code(), 400);
    assert_eq!(DomainError::NotFound("job".into()).status_code(), 404);
    assert_eq!(DomainError::StoreUnavailable("minio down".into()).status_code(), 503);
    assert!(DomainError::StoreUnavailable("x".into()).is_retryable());
}
