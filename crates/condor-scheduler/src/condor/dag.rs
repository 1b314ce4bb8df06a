//! Rendering of HTCondor DAGMan input files.
//!
//! The manifest lists every job (`JOB` + `VARS` lines) first, followed by the dependency
//! edges (`PARENT ... CHILD ...`) and an optional `DOT` directive:
//! ```text
//! JOB pre pre.condor
//! VARS pre input="data.txt" arguments=""
//! JOB 0 batch.condor
//! VARS 0 input="input/0.input" arguments=""
//! JOB post post.condor
//! VARS post input="result.txt" arguments=""
//! PARENT pre CHILD 0
//! PARENT 0 CHILD post
//! ```
use std::fmt::{Display, Formatter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::stage::{StageConfig, StageKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DagJobId {
    Pre,
    Batch(usize),
    Post,
}

impl Display for DagJobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DagJobId::Pre => f.write_str(StageKind::Pre.name()),
            DagJobId::Batch(index) => write!(f, "{index}"),
            DagJobId::Post => f.write_str(StageKind::Post.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagJob {
    pub id: DagJobId,
    pub descriptor: PathBuf,
    pub input: String,
    pub arguments: String,
}

impl DagJob {
    fn for_stage(id: DagJobId, stage: &StageConfig, input: String) -> Self {
        Self {
            id,
            descriptor: stage.descriptor_path.clone(),
            input,
            arguments: stage.arguments.clone(),
        }
    }
}

/// A three stage DAG: an optional pre job, one batch job per input group and an optional
/// post job. Every batch job depends on the pre job and the post job depends on every
/// batch job.
#[derive(Debug, Default)]
pub struct DagManifest {
    pre: Option<DagJob>,
    batch: Vec<DagJob>,
    post: Option<DagJob>,
    dot: Option<PathBuf>,
}

impl DagManifest {
    /// Creates a manifest with one batch job per input file. The position of the file is
    /// used as the id of its job.
    pub fn new(
        pre: Option<&StageConfig>,
        batch: &StageConfig,
        input_files: &[PathBuf],
        post: Option<&StageConfig>,
    ) -> Self {
        let mut manifest = Self::default();
        if let Some(stage) = pre {
            manifest.set_pre(stage);
        }
        for (index, path) in input_files.iter().enumerate() {
            manifest.add_batch_job(index, batch, path);
        }
        if let Some(stage) = post {
            manifest.set_post(stage);
        }
        manifest
    }

    pub fn set_pre(&mut self, stage: &StageConfig) {
        self.pre = Some(DagJob::for_stage(
            DagJobId::Pre,
            stage,
            stage.input.clone().unwrap_or_default(),
        ));
    }

    pub fn set_post(&mut self, stage: &StageConfig) {
        self.post = Some(DagJob::for_stage(
            DagJobId::Post,
            stage,
            stage.input.clone().unwrap_or_default(),
        ));
    }

    /// Adds (or replaces) the batch job with the given index.
    pub fn add_batch_job(&mut self, index: usize, stage: &StageConfig, input_file: &Path) {
        let job = DagJob::for_stage(
            DagJobId::Batch(index),
            stage,
            input_file.display().to_string(),
        );
        match self
            .batch
            .binary_search_by_key(&job.id, |existing| existing.id)
        {
            Ok(position) => self.batch[position] = job,
            Err(position) => self.batch.insert(position, job),
        }
    }

    pub fn set_dot(&mut self, path: Option<PathBuf>) {
        self.dot = path;
    }

    pub fn job_count(&self) -> usize {
        self.batch.len() + self.pre.iter().count() + self.post.iter().count()
    }

    /// All jobs in the order in which they are declared in the manifest.
    pub fn jobs(&self) -> impl Iterator<Item = &DagJob> {
        self.pre
            .iter()
            .chain(self.batch.iter())
            .chain(self.post.iter())
    }

    /// Dependency edges as (parents, children) pairs, pre edge first.
    ///
    /// With at least one batch job, the pre job is the parent of every batch job and every
    /// batch job is a parent of the post job. Without batch jobs, an edge with an empty side
    /// is not valid DAGMan syntax, so the only edge produced is `pre -> post` (when both
    /// exist), keeping the post job after the pre job.
    pub fn dependencies(&self) -> Vec<(Vec<DagJobId>, Vec<DagJobId>)> {
        let batch_ids: Vec<DagJobId> = self.batch.iter().map(|job| job.id).collect();
        let mut dependencies = Vec::new();

        if batch_ids.is_empty() {
            // Without batch jobs, keep at least the ordering between pre and post.
            if let (Some(pre), Some(post)) = (&self.pre, &self.post) {
                dependencies.push((vec![pre.id], vec![post.id]));
            }
            return dependencies;
        }

        if let Some(pre) = &self.pre {
            dependencies.push((vec![pre.id], batch_ids.clone()));
        }
        if let Some(post) = &self.post {
            dependencies.push((batch_ids, vec![post.id]));
        }
        dependencies
    }

    pub fn render(&self) -> String {
        let mut contents = String::new();
        for job in self.jobs() {
            writeln!(
                contents,
                "JOB {} {}",
                job.id,
                job.descriptor.display()
            )
            .unwrap();
            writeln!(
                contents,
                "VARS {} input=\"{}\" arguments=\"{}\"",
                job.id,
                escape_var_value(&job.input),
                escape_var_value(&job.arguments)
            )
            .unwrap();
        }
        for (parents, children) in self.dependencies() {
            writeln!(
                contents,
                "PARENT {} CHILD {}",
                parents.iter().join(" "),
                children.iter().join(" ")
            )
            .unwrap();
        }
        if let Some(dot) = &self.dot {
            writeln!(contents, "DOT {}", dot.display()).unwrap();
        }
        contents
    }
}

/// Escapes a value so that it can be placed inside double quotes of a `VARS` line.
fn escape_var_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
