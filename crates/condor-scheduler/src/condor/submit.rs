use std::fmt::Write;

use crate::stage::StageConfig;

/// Resolved by HTCondor from the `VARS` line of the corresponding DAG node.
pub const ARGUMENTS_PLACEHOLDER: &str = "$(arguments)";
/// Resolved by HTCondor from the `VARS` line of the corresponding DAG node.
pub const INPUT_PLACEHOLDER: &str = "$(input)";

/// Builds an HTCondor submit description for a single stage.
pub fn build_submit_description(stage: &StageConfig) -> String {
    let mut description = String::new();
    let mut entry = |key: &str, value: &dyn std::fmt::Display| {
        writeln!(description, "{key} = {value}").unwrap();
    };
    entry("universe", &stage.universe);
    entry("executable", &stage.executable.display());
    entry("arguments", &ARGUMENTS_PLACEHOLDER);
    entry("input", &INPUT_PLACEHOLDER);
    entry("output", &stage.output);
    entry("error", &stage.error);
    entry("log", &stage.log);
    description.push_str("queue\n");
    description
}
