//! Configuration of the three pipeline stages (pre, batch and post).
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::common::error::invalid_argument;

pub const DEFAULT_UNIVERSE: &str = "vanilla";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Pre,
    Batch,
    Post,
}

impl StageKind {
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Pre => "pre",
            StageKind::Batch => "batch",
            StageKind::Post => "post",
        }
    }
}

impl Display for StageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stage settings as provided by the user. Everything except the arguments is optional.
#[derive(Debug, Default, Clone)]
pub struct StageOptions {
    pub script: Option<PathBuf>,
    pub args: String,
    pub input: Option<String>,
    pub output: Option<String>,
    pub error: Option<String>,
    pub log: Option<String>,
    pub descriptor: Option<PathBuf>,
    pub universe: Option<String>,
}

/// Fully resolved configuration of a stage that has a script to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    pub kind: StageKind,
    pub executable: PathBuf,
    pub arguments: String,
    /// Input file of the stage. Always set for pre/post, `None` for batch, where every job
    /// receives its own group file instead.
    pub input: Option<String>,
    pub output: String,
    pub error: String,
    pub log: String,
    /// Where the submit description of this stage is written.
    pub descriptor_path: PathBuf,
    pub universe: String,
}

fn default_file(condor_dir: &Path, file_name: String) -> String {
    condor_dir.join(file_name).display().to_string()
}

impl StageConfig {
    /// Resolves user options of a stage into its final configuration, filling missing paths
    /// with defaults placed inside `condor_dir`.
    ///
    /// Returns `None` for a pre/post stage without a script. The batch stage always needs a
    /// script and pre/post stages with a script need an input file.
    pub fn from_options(
        kind: StageKind,
        mut options: StageOptions,
        condor_dir: &Path,
    ) -> crate::Result<Option<StageConfig>> {
        match options.script.take() {
            Some(executable) => Self::resolve(kind, executable, options, condor_dir).map(Some),
            None => match kind {
                StageKind::Batch => missing_batch_script(),
                StageKind::Pre | StageKind::Post => Ok(None),
            },
        }
    }

    /// Resolves the batch stage, which cannot be left out.
    pub fn batch(mut options: StageOptions, condor_dir: &Path) -> crate::Result<StageConfig> {
        match options.script.take() {
            Some(executable) => Self::resolve(StageKind::Batch, executable, options, condor_dir),
            None => missing_batch_script(),
        }
    }

    fn resolve(
        kind: StageKind,
        executable: PathBuf,
        options: StageOptions,
        condor_dir: &Path,
    ) -> crate::Result<StageConfig> {
        let StageOptions {
            script: _,
            args,
            input,
            output,
            error,
            log,
            descriptor,
            universe,
        } = options;

        let input = match kind {
            StageKind::Batch => None,
            StageKind::Pre | StageKind::Post => match input {
                Some(input) => Some(input),
                None => {
                    return invalid_argument(format!(
                        "input file required for {kind}-script {}",
                        executable.display()
                    ));
                }
            },
        };

        Ok(StageConfig {
            kind,
            executable,
            arguments: args,
            input,
            output: output
                .unwrap_or_else(|| default_file(condor_dir, format!("{kind}.out.$(process)"))),
            error: error
                .unwrap_or_else(|| default_file(condor_dir, format!("{kind}.err.$(process)"))),
            log: log.unwrap_or_else(|| default_file(condor_dir, format!("{kind}.log.$(process)"))),
            descriptor_path: descriptor
                .unwrap_or_else(|| condor_dir.join(format!("{kind}.condor"))),
            universe: universe.unwrap_or_else(|| DEFAULT_UNIVERSE.to_string()),
        })
    }
}

fn missing_batch_script<T>() -> crate::Result<T> {
    invalid_argument("batch script is required".to_string())
}

#[cfg(test)]
mod tests {
    use crate::common::error::SchedulerError;
    use crate::stage::{StageConfig, StageKind, StageOptions};
    use std::path::{Path, PathBuf};

    fn script(path: &str) -> StageOptions {
        StageOptions {
            script: Some(PathBuf::from(path)),
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_defaults() {
        let config = StageConfig::from_options(StageKind::Batch, script("run.sh"), Path::new("cs"))
            .unwrap()
            .unwrap();
        assert_eq!(
            config,
            StageConfig {
                kind: StageKind::Batch,
                executable: PathBuf::from("run.sh"),
                arguments: "".to_string(),
                input: None,
                output: "cs/batch.out.$(process)".to_string(),
                error: "cs/batch.err.$(process)".to_string(),
                log: "cs/batch.log.$(process)".to_string(),
                descriptor_path: PathBuf::from("cs/batch.condor"),
                universe: "vanilla".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_values_win() {
        let options = StageOptions {
            script: Some(PathBuf::from("post.sh")),
            args: "--fast".to_string(),
            input: Some("merged.txt".to_string()),
            output: Some("o".to_string()),
            error: Some("e".to_string()),
            log: Some("l".to_string()),
            descriptor: Some(PathBuf::from("d.condor")),
            universe: Some("local".to_string()),
        };
        let config = StageConfig::from_options(StageKind::Post, options, Path::new("cs"))
            .unwrap()
            .unwrap();
        assert_eq!(config.arguments, "--fast");
        assert_eq!(config.input.as_deref(), Some("merged.txt"));
        assert_eq!(config.output, "o");
        assert_eq!(config.error, "e");
        assert_eq!(config.log, "l");
        assert_eq!(config.descriptor_path, PathBuf::from("d.condor"));
        assert_eq!(config.universe, "local");
    }

    #[test]
    fn test_batch_ignores_input() {
        let mut options = script("run.sh");
        options.input = Some("ignored".to_string());
        let config = StageConfig::from_options(StageKind::Batch, options, Path::new("cs"))
            .unwrap()
            .unwrap();
        assert_eq!(config.input, None);
    }

    #[test]
    fn test_optional_stage_without_script() {
        for kind in [StageKind::Pre, StageKind::Post] {
            let options = StageOptions {
                input: Some("in".to_string()),
                ..Default::default()
            };
            assert_eq!(
                StageConfig::from_options(kind, options, Path::new("cs")).unwrap(),
                None
            );
        }
    }

    #[test]
    fn test_batch_without_script() {
        assert!(matches!(
            StageConfig::from_options(StageKind::Batch, Default::default(), Path::new("cs")),
            Err(SchedulerError::InvalidArgument(_))
        ));
        assert!(matches!(
            StageConfig::batch(Default::default(), Path::new("cs")),
            Err(SchedulerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_batch_constructor_matches_from_options() {
        let mut options = script("run.sh");
        options.args = "-n 3".to_string();
        let batch = StageConfig::batch(options.clone(), Path::new("cs")).unwrap();
        assert_eq!(
            Some(batch.clone()),
            StageConfig::from_options(StageKind::Batch, options, Path::new("cs")).unwrap()
        );
        assert_eq!(batch.kind, StageKind::Batch);
        assert_eq!(batch.arguments, "-n 3");
    }

    #[test]
    fn test_pre_post_require_input() {
        let error = StageConfig::from_options(StageKind::Pre, script("pre.sh"), Path::new("cs"))
            .unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"Invalid argument: input file required for pre-script pre.sh");

        assert!(matches!(
            StageConfig::from_options(StageKind::Post, script("post.sh"), Path::new("cs")),
            Err(SchedulerError::InvalidArgument(_))
        ));
    }
}
