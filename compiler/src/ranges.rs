//! Run-length compression of sorted field numbers into `ProtobufCIntRange`
//! tables.
//!
//! A message's field numbers are usually a few contiguous runs. Instead of a
//! lookup table indexed by number, the runtime binary-searches a table of run
//! starts and recovers a field's position as
//! `orig_index + (number - start_value)`.

use serde::Serialize;
use tracing::trace;

use crate::{
    error::CodegenError,
    printer::{Printer, Variables},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    pub start_value: i32,
    pub orig_index:  i32,
}

/// Range entries followed by the `{0, len}` sentinel. The sentinel is told
/// apart by position, not by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeTable {
    pub entries:  Vec<IntRange>,
    pub n_ranges: usize,
}

impl RangeTable {
    pub fn is_empty(&self) -> bool {
        self.n_ranges == 0
    }

    /// The real ranges, without the sentinel.
    pub fn ranges(&self) -> &[IntRange] {
        &self.entries[..self.n_ranges]
    }

    pub fn sentinel(&self) -> Option<&IntRange> {
        self.entries.last()
    }

    /// Position of `key` in the original sorted key list, if present.
    pub fn lookup(&self, key: i32) -> Option<usize> {
        let ranges = self.ranges();
        let total = self.sentinel()?.orig_index;

        let idx = ranges.partition_point(|r| r.start_value <= key).checked_sub(1)?;
        let range = ranges[idx];
        let run_end = match ranges.get(idx + 1) {
            Some(next) => next.orig_index,
            None => total,
        };

        let offset = i64::from(key) - i64::from(range.start_value);
        let position = i64::from(range.orig_index) + offset;
        if position < i64::from(run_end) {
            usize::try_from(position).ok()
        } else {
            None
        }
    }
}

/// Compresses strictly ascending `values` into a range table.
///
/// # Panics
///
/// When `values` is not strictly ascending.
pub fn compress_ranges(values: &[i32]) -> RangeTable {
    assert!(
        values.windows(2).all(|pair| pair[0] < pair[1]),
        "range compression needs strictly ascending keys"
    );

    if values.is_empty() {
        return RangeTable::default();
    }

    let mut entries = Vec::new();
    let mut last_range_start = 0usize;
    for i in 1..values.len() {
        if values[i - 1].checked_add(1) != Some(values[i]) {
            entries.push(run_entry(values, last_range_start, i));
            last_range_start = i;
        }
    }
    entries.push(run_entry(values, last_range_start, values.len()));

    let n_ranges = entries.len();
    entries.push(IntRange { start_value: 0, orig_index: values.len() as i32 });
    RangeTable { entries, n_ranges }
}

/// Entry for the run `values[start..end]`.
fn run_entry(values: &[i32], start: usize, end: usize) -> IntRange {
    let count = (end - start) as i32;
    IntRange {
        start_value: values[end - 1] - (count - 1),
        orig_index:  start as i32,
    }
}

/// Prints the range table for `values` as a C array named `name`, or a
/// `NULL` define when there are no values. Returns the number of ranges.
pub fn write_int_ranges(printer: &mut Printer, values: &[i32], name: &str) -> Result<usize, CodegenError> {
    let table = compress_ranges(values);
    trace!(name, n_ranges = table.n_ranges, "writing int ranges");

    let mut vars = Variables::new();
    vars.insert("name".to_string(), name.to_string());

    if table.is_empty() {
        printer.print(&vars, "#define $name$ NULL\n")?;
        return Ok(0);
    }

    vars.insert("n_ranges".to_string(), table.n_ranges.to_string());
    printer.print(&vars, "static const ProtobufCIntRange $name$[$n_ranges$ + 1] =\n{\n")?;
    for range in table.ranges() {
        vars.insert("start_value".to_string(), range.start_value.to_string());
        vars.insert("orig_offset".to_string(), range.orig_index.to_string());
        printer.print(&vars, "  { $start_value$, $orig_offset$ },\n")?;
    }
    vars.insert("n_entries".to_string(), values.len().to_string());
    printer.print(&vars, "  { 0, $n_entries$ }\n")?;
    printer.print(&vars, "};\n")?;
    Ok(table.n_ranges)
}
