use std::path::PathBuf;

use clap::{Args, Parser};

use crate::stage::StageOptions;

#[derive(Args)]
#[command(next_help_heading = "General")]
pub struct GeneralOpts {
    /// Minimum number of lines to process in a single job
    #[arg(long, default_value_t = 10)]
    pub min_size: usize,

    /// Maximum number of Condor jobs to schedule.
    /// When set, the group size is derived from it and `--min-size` is ignored
    #[arg(long)]
    pub max_jobs: Option<usize>,

    /// Directory to store all Condor files
    #[arg(
        short = 'd',
        long,
        default_value = "./condor_scheduler",
        env = "CONDOR_SCHEDULER_DIR",
        value_hint = clap::ValueHint::DirPath
    )]
    pub condor_dir: PathBuf,

    /// File with the lines to split into jobs [default: stdin]
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub input_file: Option<PathBuf>,

    /// DAG file to generate [default: <condor-dir>/condor.dag]
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub dag: Option<PathBuf>,

    /// Submit the DAG into Condor after creation
    #[arg(long)]
    pub submit: bool,

    /// Graphviz output file for DAG visualization
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub dot: Option<PathBuf>,

    /// Print the contents of the generated Condor files
    #[arg(long)]
    pub print: bool,

    /// Enables more detailed log output
    #[arg(long, env = "CONDOR_SCHEDULER_DEBUG")]
    pub debug: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Batch Script")]
pub struct BatchOpts {
    /// Batch script to execute
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub batch_script: PathBuf,

    /// Arguments to batch script
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub batch_args: String,

    /// Directory to populate with separated input files [default: <condor-dir>/input]
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub batch_input_dir: Option<PathBuf>,

    /// Output file for batch script [default: <condor-dir>/batch.out.$(process)]
    #[arg(long)]
    pub batch_output: Option<String>,

    /// Error file for batch script [default: <condor-dir>/batch.err.$(process)]
    #[arg(long)]
    pub batch_error: Option<String>,

    /// Log file for batch script [default: <condor-dir>/batch.log.$(process)]
    #[arg(long)]
    pub batch_log: Option<String>,

    /// Condor file to generate for batch script [default: <condor-dir>/batch.condor]
    #[arg(long)]
    pub batch_condor: Option<PathBuf>,

    /// Universe for batch script
    #[arg(long, default_value = "vanilla")]
    pub batch_universe: String,
}

#[derive(Args)]
#[command(next_help_heading = "Pre Script")]
pub struct PreOpts {
    /// Script to execute before batch script
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub pre_script: Option<PathBuf>,

    /// Arguments to pre script
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub pre_args: String,

    /// Input file for pre script (required if --pre-script is provided)
    #[arg(long)]
    pub pre_input: Option<String>,

    /// Output file for pre script [default: <condor-dir>/pre.out.$(process)]
    #[arg(long)]
    pub pre_output: Option<String>,

    /// Error file for pre script [default: <condor-dir>/pre.err.$(process)]
    #[arg(long)]
    pub pre_error: Option<String>,

    /// Log file for pre script [default: <condor-dir>/pre.log.$(process)]
    #[arg(long)]
    pub pre_log: Option<String>,

    /// Condor file to generate for pre script [default: <condor-dir>/pre.condor]
    #[arg(long)]
    pub pre_condor: Option<PathBuf>,

    /// Universe for pre script
    #[arg(long, default_value = "vanilla")]
    pub pre_universe: String,
}

#[derive(Args)]
#[command(next_help_heading = "Post Script")]
pub struct PostOpts {
    /// Script to execute after batch script
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub post_script: Option<PathBuf>,

    /// Arguments to post script
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub post_args: String,

    /// Input file for post script (required if --post-script is provided)
    #[arg(long)]
    pub post_input: Option<String>,

    /// Output file for post script [default: <condor-dir>/post.out.$(process)]
    #[arg(long)]
    pub post_output: Option<String>,

    /// Error file for post script [default: <condor-dir>/post.err.$(process)]
    #[arg(long)]
    pub post_error: Option<String>,

    /// Log file for post script [default: <condor-dir>/post.log.$(process)]
    #[arg(long)]
    pub post_log: Option<String>,

    /// Condor file to generate for post script [default: <condor-dir>/post.condor]
    #[arg(long)]
    pub post_condor: Option<PathBuf>,

    /// Universe for post script
    #[arg(long, default_value = "vanilla")]
    pub post_universe: String,
}

impl From<BatchOpts> for StageOptions {
    fn from(opts: BatchOpts) -> Self {
        StageOptions {
            script: Some(opts.batch_script),
            args: opts.batch_args,
            input: None,
            output: opts.batch_output,
            error: opts.batch_error,
            log: opts.batch_log,
            descriptor: opts.batch_condor,
            universe: Some(opts.batch_universe),
        }
    }
}

impl From<PreOpts> for StageOptions {
    fn from(opts: PreOpts) -> Self {
        StageOptions {
            script: opts.pre_script,
            args: opts.pre_args,
            input: opts.pre_input,
            output: opts.pre_output,
            error: opts.pre_error,
            log: opts.pre_log,
            descriptor: opts.pre_condor,
            universe: Some(opts.pre_universe),
        }
    }
}

impl From<PostOpts> for StageOptions {
    fn from(opts: PostOpts) -> Self {
        StageOptions {
            script: opts.post_script,
            args: opts.post_args,
            input: opts.post_input,
            output: opts.post_output,
            error: opts.post_error,
            log: opts.post_log,
            descriptor: opts.post_condor,
            universe: Some(opts.post_universe),
        }
    }
}

// Root CLI options
#[derive(Parser)]
#[command(about, version, help_expected(true))]
pub struct RootOptions {
    #[clap(flatten)]
    pub general: GeneralOpts,

    #[clap(flatten)]
    pub batch: BatchOpts,

    #[clap(flatten)]
    pub pre: PreOpts,

    #[clap(flatten)]
    pub post: PostOpts,

    /// Additional arguments passed to `condor_submit_dag` when using `--submit`.
    /// Can be repeated, a single value is split on spaces
    #[arg(
        long,
        allow_hyphen_values = true,
        value_delimiter = ' ',
        help_heading("General")
    )]
    pub submit_args: Vec<String>,

    /// Additional arguments for `condor_submit_dag`, appended after `--submit-args`
    #[arg(last = true)]
    pub trailing_submit_args: Vec<String>,
}

impl RootOptions {
    /// Arguments for `condor_submit_dag` from both `--submit-args` and the trailing `-- ...`.
    pub fn submit_arguments(&self) -> Vec<String> {
        self.submit_args
            .iter()
            .chain(self.trailing_submit_args.iter())
            .filter(|arg| !arg.is_empty())
            .cloned()
            .collect()
    }
}
