//! Location utilities: source segments, copying, filling and shifting.

use super::node::{Node, NodeBase};
use super::walk::walk_mut;
use crate::base::Location;

/// The text of `source` covered by `node`'s location.
///
/// The end column is inclusive. With `padded`, the first line is taken from
/// column 0 instead of the node's start column. Returns `None` when any of
/// the four coordinates is unset or the source has too few lines.
pub fn get_source_segment(source: &str, node: &dyn Node, padded: bool) -> Option<String> {
    let span = node.location().span()?;
    let (lineno, end_lineno) = (span.start.line, span.end.line);
    if lineno == 0 || end_lineno < lineno {
        return None;
    }
    let col_offset = if padded { 0 } else { span.start.column };

    // A trailing partial line that is empty does not count as a line.
    let mut lines: Vec<&str> = source.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.len() < end_lineno {
        return None;
    }

    let window = &lines[lineno - 1..end_lineno];
    let last = window.len() - 1;
    let mut segment = Vec::with_capacity(window.len());
    for (index, line) in window.iter().enumerate() {
        let mut text: &str = line;
        if index == last {
            text = take_chars(text, span.end.column.saturating_add(1));
        }
        if index == 0 {
            text = skip_chars(text, col_offset);
        }
        segment.push(text);
    }
    Some(segment.join("\n"))
}

fn take_chars(text: &str, count: usize) -> &str {
    text.char_indices()
        .nth(count)
        .map_or(text, |(index, _)| &text[..index])
}

fn skip_chars(text: &str, count: usize) -> &str {
    text.char_indices()
        .nth(count)
        .map_or("", |(index, _)| &text[index..])
}

/// Copy all four location coordinates from `source` onto `target`.
///
/// Coordinates unset on `source` become unset on `target`.
pub fn copy_location<'a, T: Node + ?Sized>(source: &dyn Node, target: &'a mut T) -> &'a mut T {
    *target.location_mut() = *source.location();
    target
}

/// Fill every unset coordinate from the nearest ancestor, starting from
/// `(1, 0, 1, 0)` at the root. Coordinates that are already set are kept.
pub fn fix_missing_locations<T: Node + ?Sized>(node: &mut T) -> &mut T {
    let mut todo: Vec<(&mut NodeBase, Location)> =
        vec![(node.base_mut(), Location::new(1, 0, 1, 0))];
    while let Some((base, inherited)) = todo.pop() {
        let location = &mut base.location;
        inherit(&mut location.lineno, inherited.lineno);
        inherit(&mut location.col_offset, inherited.col_offset);
        inherit(&mut location.end_lineno, inherited.end_lineno);
        inherit(&mut location.end_col_offset, inherited.end_col_offset);

        let resolved = base.location;
        todo.extend(
            base.child_nodes_mut()
                .into_iter()
                .map(|child| (child.base_mut(), resolved)),
        );
    }
    node
}

fn inherit(slot: &mut Option<usize>, inherited: Option<usize>) {
    if slot.is_none() {
        *slot = inherited;
    }
}

/// Shift the line numbers of `node` and all descendants by `delta`.
///
/// Only `lineno` and `end_lineno` change, and only where set. Columns are
/// left alone.
pub fn increment_lineno<T: Node + ?Sized>(node: &mut T, delta: isize) -> &mut T {
    walk_mut(&mut *node, |base| {
        let location = &mut base.location;
        for line in [&mut location.lineno, &mut location.end_lineno] {
            if let Some(line) = line {
                *line = line.saturating_add_signed(delta);
            }
        }
    });
    node
}
