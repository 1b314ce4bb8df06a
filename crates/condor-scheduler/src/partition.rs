//! Splits the input lines into equally sized groups, one group per batch job.
//!
//! The index of a group in the returned sequence is also the name of its input file
//! (`<index>.input`) and the id of the batch job that processes it.
use std::path::{Path, PathBuf};

use bstr::{BString, ByteSlice};
use itertools::Itertools;

use crate::common::error::invalid_argument;
use crate::common::utils::fs::write_parts;

/// A fixed-size chunk of items. Trailing slots are `None` when the source ran out.
pub type Group<T> = Vec<Option<T>>;

/// Computes the number of items that will be put into each group.
///
/// Without `max_groups`, the size is simply `min_size`. With `max_groups`, the size is
/// `ceil(item_count / max_groups)` and `min_size` is ignored entirely, even if the computed
/// size is smaller than `min_size`. The group count is capped first and the size derived
/// from it, so `min_size` is *not* a lower bound when `max_groups` is set.
///
/// Returns 0 for an empty input with `max_groups` set.
pub fn group_size(
    item_count: usize,
    min_size: usize,
    max_groups: Option<usize>,
) -> crate::Result<usize> {
    check_partition_args(min_size, max_groups)?;
    Ok(match max_groups {
        None => min_size,
        Some(max_groups) => item_count.div_ceil(max_groups),
    })
}

pub fn check_partition_args(min_size: usize, max_groups: Option<usize>) -> crate::Result<()> {
    if min_size == 0 {
        return invalid_argument("minimum group size has to be at least 1".to_string());
    }
    if max_groups == Some(0) {
        return invalid_argument("maximum number of groups has to be at least 1".to_string());
    }
    Ok(())
}

/// Splits `items` into consecutive groups of [`group_size`] items.
/// The last group is padded with `None` up to the full size.
pub fn partition<T: Clone>(
    items: &[T],
    min_size: usize,
    max_groups: Option<usize>,
) -> crate::Result<Vec<Group<T>>> {
    let size = group_size(items.len(), min_size, max_groups)?;
    log::debug!(
        "Partitioning {} item(s) into groups of size {size}",
        items.len()
    );
    if items.is_empty() {
        return Ok(Vec::new());
    }

    Ok(items
        .chunks(size)
        .map(|chunk| {
            chunk
                .iter()
                .cloned()
                .map(Some)
                .pad_using(size, |_| None)
                .collect()
        })
        .collect())
}

/// Splits raw input into lines, keeping the line terminators so that the lines can be
/// written back byte-for-byte. The input does not have to be valid UTF-8.
pub fn split_lines(input: &[u8]) -> Vec<BString> {
    input.lines_with_terminator().map(BString::from).collect()
}

pub fn group_file_path(directory: &Path, index: usize) -> PathBuf {
    directory.join(format!("{index}.input"))
}

/// Writes each group into `<directory>/<index>.input`, skipping the padding slots.
/// The returned paths are ordered by group index.
pub fn write_group_files(
    groups: &[Group<BString>],
    directory: &Path,
) -> crate::Result<Vec<PathBuf>> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let path = group_file_path(directory, index);
            write_parts(&path, group.iter().flatten().map(|line| line.as_bytes()))?;
            Ok(path)
        })
        .collect()
}

/// Partitions `lines` and materializes every group as a file inside `directory`.
pub fn make_input_files(
    lines: &[BString],
    directory: &Path,
    min_size: usize,
    max_groups: Option<usize>,
) -> crate::Result<Vec<PathBuf>> {
    let groups = partition(lines, min_size, max_groups)?;
    write_group_files(&groups, directory)
}
