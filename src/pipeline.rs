//! The pipeline driver (§4.5/P): composes evaluate -> build -> convert ->
//! write per input file and aggregates diagnostic reports. Reading OpenDRIVE
//! bytes and writing CityGML bytes are external collaborators (§6); this
//! module only defines the traits a host implements and drives them.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::citygml::{build_city_model, model::CityModel};
use crate::config::Configuration;
use crate::evaluator::message::{Message, MessageList, Severity};
use crate::evaluator::{evaluate_fatal_violations, evaluate_non_fatal_violations};
use crate::opendrive::OpenDriveModel;
use crate::roadspaces::build_roadspaces_model;

/// A version-specific OpenDRIVE reader, selected by the host from a
/// registry keyed by schema version (§9 "versioned schemas"). Reading is an
/// external collaborator; the core only consumes the normalised model it
/// returns.
pub trait OpenDriveReader {
    fn read(&self, path: &Path) -> std::result::Result<OpenDriveModel, ReadError>;
}

/// Writes a finished `CityModel` out as CityGML 2.0 or 3.0 bytes (§6,
/// "Output serialisation (external)").
pub trait CityGmlWriter {
    fn write(&self, model: &CityModel, target: &Path) -> std::result::Result<PathBuf, WriteError>;
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read {path}: {reason}")]
pub struct ReadError {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write {target}: {reason}")]
pub struct WriteError {
    pub target: PathBuf,
    pub reason: String,
}

/// Cooperative cancellation signal (§5): checked between plans and between
/// roads. A host cancels long batches without the core blocking or
/// polling on its own.
pub trait CancellationToken {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels; the default for callers that don't need the feature.
pub struct NeverCancelled;

impl CancellationToken for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// What happened to one input file (§7 "two disjoint kinds" of outcome,
/// plus cancellation).
#[derive(Debug)]
pub enum FileOutcome {
    Written { output: PathBuf },
    Fatal,
    Cancelled,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
    pub messages: MessageList,
}

impl PipelineReport {
    pub fn has_fatal(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::FatalError)
    }
}

fn read_error_message(error: &ReadError) -> Message {
    Message::fatal("ReadFailed", error.path.to_string_lossy(), error.reason.clone())
}

fn write_error_message(error: &WriteError) -> Message {
    Message::fatal("WriteFailed", error.target.to_string_lossy(), error.reason.clone())
}

/// Runs one input file through read -> fatal-evaluate -> non-fatal-evaluate
/// -> build RoadSpaces -> build CityGML -> write (§4.5). Always returns a
/// report; never panics on a malformed input.
pub fn process_file(
    input: &Path,
    output: &Path,
    reader: &dyn OpenDriveReader,
    writer: &dyn CityGmlWriter,
    config: &Configuration,
    cancellation: &dyn CancellationToken,
) -> PipelineReport {
    info!("processing {}", input.display());
    let mut messages = MessageList::new();

    let model = match reader.read(input) {
        Ok(model) => model,
        Err(read_error) => {
            error!("failed to read {}: {}", input.display(), read_error.reason);
            messages.push(read_error_message(&read_error));
            return PipelineReport {
                input: input.to_path_buf(),
                outcome: FileOutcome::Fatal,
                messages,
            };
        }
    };

    let fatal = evaluate_fatal_violations(&model);
    if !fatal.is_empty() {
        error!("{} has {} fatal violation(s)", input.display(), fatal.len());
        messages.extend(fatal);
        return PipelineReport {
            input: input.to_path_buf(),
            outcome: FileOutcome::Fatal,
            messages,
        };
    }

    if cancellation.is_cancelled() {
        return PipelineReport {
            input: input.to_path_buf(),
            outcome: FileOutcome::Cancelled,
            messages,
        };
    }

    let (healed, healed_messages) = evaluate_non_fatal_violations(&model, &config.healer_config());
    if !healed_messages.is_empty() {
        warn!("{} healed {} non-fatal violation(s)", input.display(), healed_messages.len());
    }
    messages.extend(healed_messages);

    if cancellation.is_cancelled() {
        return PipelineReport {
            input: input.to_path_buf(),
            outcome: FileOutcome::Cancelled,
            messages,
        };
    }

    let (roadspaces_model, roadspaces_errors) = build_roadspaces_model(&healed, config.distance_tolerance());
    for error in &roadspaces_errors {
        messages.push(Message::fatal("RoadspacesBuildFailed", "roadspaces", error.to_string()));
    }
    if !roadspaces_errors.is_empty() {
        return PipelineReport {
            input: input.to_path_buf(),
            outcome: FileOutcome::Fatal,
            messages,
        };
    }

    if cancellation.is_cancelled() {
        return PipelineReport {
            input: input.to_path_buf(),
            outcome: FileOutcome::Cancelled,
            messages,
        };
    }

    let city_model = match build_city_model(&roadspaces_model, config) {
        Ok(model) => model,
        Err(error) => {
            messages.push(Message::fatal("CityGmlBuildFailed", "citygml", error.to_string()));
            return PipelineReport {
                input: input.to_path_buf(),
                outcome: FileOutcome::Fatal,
                messages,
            };
        }
    };

    match writer.write(&city_model, output) {
        Ok(path) => {
            info!("wrote {}", path.display());
            PipelineReport {
                input: input.to_path_buf(),
                outcome: FileOutcome::Written { output: path },
                messages,
            }
        }
        Err(write_error) => {
            error!("failed to write {}: {}", output.display(), write_error.reason);
            messages.push(write_error_message(&write_error));
            PipelineReport {
                input: input.to_path_buf(),
                outcome: FileOutcome::Fatal,
                messages,
            }
        }
    }
}

/// Runs every input file in sequence (§5: "single-threaded per input
/// file"; running files across worker threads is left to the host, which
/// can call `process_file` from however many threads it likes since each
/// call owns its models exclusively).
pub fn run_pipeline(
    inputs: &[PathBuf],
    output_dir: &Path,
    reader: &dyn OpenDriveReader,
    writer: &dyn CityGmlWriter,
    config: &Configuration,
    cancellation: &dyn CancellationToken,
) -> Vec<PipelineReport> {
    inputs
        .iter()
        .map(|input| {
            let file_name = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let output = output_dir.join(format!("{file_name}.gml"));
            process_file(input, &output, reader, writer, config, cancellation)
        })
        .collect()
}

/// Non-zero only when invoked in strict mode and any fatal occurred (§7
/// "User-visible behaviour").
pub fn exit_code(reports: &[PipelineReport], strict: bool) -> i32 {
    if strict && reports.iter().any(|r| r.has_fatal()) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citygml::CityModel;

    struct FailingReader;
    impl OpenDriveReader for FailingReader {
        fn read(&self, path: &Path) -> std::result::Result<OpenDriveModel, ReadError> {
            Err(ReadError {
                path: path.to_path_buf(),
                reason: "not xml".to_string(),
            })
        }
    }

    struct NoopWriter;
    impl CityGmlWriter for NoopWriter {
        fn write(&self, _model: &CityModel, target: &Path) -> std::result::Result<PathBuf, WriteError> {
            Ok(target.to_path_buf())
        }
    }

    struct EmptyReader;
    impl OpenDriveReader for EmptyReader {
        fn read(&self, _path: &Path) -> std::result::Result<OpenDriveModel, ReadError> {
            Ok(OpenDriveModel::default())
        }
    }

    #[test]
    fn read_failure_is_a_fatal_outcome() {
        let report = process_file(
            Path::new("in.xodr"),
            Path::new("out.gml"),
            &FailingReader,
            &NoopWriter,
            &Configuration::default(),
            &NeverCancelled,
        );
        assert!(matches!(report.outcome, FileOutcome::Fatal));
        assert!(report.has_fatal());
    }

    #[test]
    fn empty_model_with_no_roads_writes_successfully() {
        let report = process_file(
            Path::new("in.xodr"),
            Path::new("out.gml"),
            &EmptyReader,
            &NoopWriter,
            &Configuration::default(),
            &NeverCancelled,
        );
        assert!(matches!(report.outcome, FileOutcome::Written { .. }));
        assert!(!report.has_fatal());
    }

    struct AlwaysCancelled;
    impl CancellationToken for AlwaysCancelled {
        fn is_cancelled(&self) -> bool {
            true
        }
    }

    #[test]
    fn cancellation_after_fatal_check_short_circuits_before_writing() {
        let report = process_file(
            Path::new("in.xodr"),
            Path::new("out.gml"),
            &EmptyReader,
            &NoopWriter,
            &Configuration::default(),
            &AlwaysCancelled,
        );
        assert!(matches!(report.outcome, FileOutcome::Cancelled));
    }

    #[test]
    fn exit_code_is_zero_unless_strict_and_fatal() {
        let reports = vec![PipelineReport {
            input: PathBuf::from("a"),
            outcome: FileOutcome::Fatal,
            messages: vec![Message::fatal("X", "a", "boom")],
        }];
        assert_eq!(exit_code(&reports, false), 0);
        assert_eq!(exit_code(&reports, true), 1);
    }
}
