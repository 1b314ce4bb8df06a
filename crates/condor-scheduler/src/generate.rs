//! Ties the partitioning and the Condor file generation together into a single run.
use std::path::PathBuf;

use bstr::BString;

use crate::common::cli::RootOptions;
use crate::common::utils::fs::{make_sure_path_exists, write_file};
use crate::condor::dag::DagManifest;
use crate::condor::submit::build_submit_description;
use crate::partition::{check_partition_args, partition, write_group_files};
use crate::stage::{StageConfig, StageKind};

pub const DEFAULT_DAG_FILE_NAME: &str = "condor.dag";
pub const DEFAULT_INPUT_DIR_NAME: &str = "input";

/// Fully resolved configuration of a single run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub condor_dir: PathBuf,
    pub batch_input_dir: PathBuf,
    pub dag_path: PathBuf,
    pub dot_path: Option<PathBuf>,
    pub input_file: Option<PathBuf>,
    pub min_size: usize,
    pub max_jobs: Option<usize>,
    pub pre: Option<StageConfig>,
    pub batch: StageConfig,
    pub post: Option<StageConfig>,
    pub submit: bool,
    pub submit_args: Vec<String>,
    pub print: bool,
}

impl GeneratorConfig {
    /// Fills in all defaults and validates the options.
    /// Nothing is written to the filesystem here.
    pub fn from_options(opts: RootOptions) -> crate::Result<Self> {
        let submit_args = opts.submit_arguments();
        let RootOptions {
            general,
            batch,
            pre,
            post,
            ..
        } = opts;
        check_partition_args(general.min_size, general.max_jobs)?;

        let condor_dir = general.condor_dir;
        let batch_input_dir = batch
            .batch_input_dir
            .clone()
            .unwrap_or_else(|| condor_dir.join(DEFAULT_INPUT_DIR_NAME));
        let batch = StageConfig::batch(batch.into(), &condor_dir)?;
        let pre = StageConfig::from_options(StageKind::Pre, pre.into(), &condor_dir)?;
        let post = StageConfig::from_options(StageKind::Post, post.into(), &condor_dir)?;
        let dag_path = general
            .dag
            .unwrap_or_else(|| condor_dir.join(DEFAULT_DAG_FILE_NAME));

        Ok(Self {
            condor_dir,
            batch_input_dir,
            dag_path,
            dot_path: general.dot,
            input_file: general.input_file,
            min_size: general.min_size,
            max_jobs: general.max_jobs,
            pre,
            batch,
            post,
            submit: general.submit,
            submit_args,
            print: general.print,
        })
    }

    /// Configured stages, batch first.
    pub fn stages(&self) -> impl Iterator<Item = &StageConfig> {
        std::iter::once(&self.batch)
            .chain(self.pre.iter())
            .chain(self.post.iter())
    }
}

#[derive(Debug)]
pub struct GeneratedFile {
    pub name: String,
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug)]
pub struct GeneratedFiles {
    /// Group input files, ordered by batch job id.
    pub input_files: Vec<PathBuf>,
    pub descriptors: Vec<GeneratedFile>,
    pub dag: GeneratedFile,
    pub job_count: usize,
}

/// Splits `lines` into group files and writes the submit descriptions and the DAG file.
pub fn generate(config: &GeneratorConfig, lines: &[BString]) -> crate::Result<GeneratedFiles> {
    let groups = partition(lines, config.min_size, config.max_jobs)?;

    for directory in [&config.condor_dir, &config.batch_input_dir] {
        make_sure_path_exists(directory)?;
    }

    let input_files = write_group_files(&groups, &config.batch_input_dir)?;
    log::debug!(
        "Created {} input file(s) in {}",
        input_files.len(),
        config.batch_input_dir.display()
    );

    let descriptors = config
        .stages()
        .map(|stage| {
            let contents = build_submit_description(stage);
            write_file(&stage.descriptor_path, &contents)?;
            Ok(GeneratedFile {
                name: stage.kind.to_string(),
                path: stage.descriptor_path.clone(),
                contents,
            })
        })
        .collect::<crate::Result<Vec<_>>>()?;

    let mut manifest = DagManifest::new(
        config.pre.as_ref(),
        &config.batch,
        &input_files,
        config.post.as_ref(),
    );
    manifest.set_dot(config.dot_path.clone());
    let contents = manifest.render();
    write_file(&config.dag_path, &contents)?;

    let job_count = manifest.job_count();
    log::info!(
        "Generated DAG {} with {job_count} job(s)",
        config.dag_path.display()
    );

    Ok(GeneratedFiles {
        input_files,
        descriptors,
        dag: GeneratedFile {
            name: "DAG".to_string(),
            path: config.dag_path.clone(),
            contents,
        },
        job_count,
    })
}
