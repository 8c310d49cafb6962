use std::time::Duration;

use aml_client::{stream_job, ClientError, ControlPlane, InMemoryControlPlane};
use aml_core::JobStatus;
use aml_steps::{taxi_training_job, TaxiJobInputs, TaxiSteps};

fn submitted_plane(plane: &InMemoryControlPlane) -> String {
    let steps = TaxiSteps::with_environment("taxi-env@latest").unwrap();
    let job = taxi_training_job(&steps,
                                "exp1",
                                TaxiJobInputs { raw_data: "taxi-data@latest".into(),
                                                enable_monitoring: "false".into(),
                                                table_name: "taximonitoring".into() }).unwrap();
    plane.create_or_update_job(&job).unwrap().name
}

#[test]
fn stream_prints_incremental_logs_and_summary() {
    let plane = InMemoryControlPlane::new().with_statuses([JobStatus::Queued, JobStatus::Running, JobStatus::Completed])
                                           .with_log_snapshot(&[])
                                           .with_log_snapshot(&[("azureml-logs/std_log.txt", "step 1\n")])
                                           .with_log_snapshot(&[("azureml-logs/std_log.txt", "step 1\nstep 2\n")]);
    let name = submitted_plane(&plane);
    let mut out = Vec::new();
    let done = stream_job(&plane, &name, Duration::ZERO, &mut out).unwrap();
    assert_eq!(done.status, JobStatus::Completed);

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(&format!("RunId: {name}\n")));
    assert_eq!(text.matches("step 1").count(), 1, "log content must not repeat:\n{text}");
    assert_eq!(text.matches("Streaming azureml-logs/std_log.txt").count(), 1);
    assert!(text.contains("step 2"));
    assert!(text.contains("Execution Summary"));
    assert!(text.contains("Status: Completed"));
}

#[test]
fn failed_job_surfaces_as_error() {
    let plane = InMemoryControlPlane::new().with_statuses([JobStatus::Running, JobStatus::Failed]);
    let name = submitted_plane(&plane);
    let mut out = Vec::new();
    let err = stream_job(&plane, &name, Duration::ZERO, &mut out).unwrap_err();
    match err {
        ClientError::JobFailed { name: failed, status } => {
            assert_eq!(failed, name);
            assert_eq!(status, JobStatus::Failed);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(String::from_utf8(out).unwrap().contains("Status: Failed"));
}

#[test]
fn canceled_job_is_terminal_but_not_success() {
    let plane = InMemoryControlPlane::new().with_statuses([JobStatus::Canceled]);
    let name = submitted_plane(&plane);
    let err = stream_job(&plane, &name, Duration::ZERO, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ClientError::JobFailed { status: JobStatus::Canceled, .. }));
}

#[test]
fn unknown_job_cannot_be_streamed() {
    let plane = InMemoryControlPlane::new();
    let err = stream_job(&plane, "missing_job", Duration::ZERO, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ClientError::NotFound { kind: "job", .. }));
}
