//! Variables tree held by the host
//!
//! The host side of the inspector contract: one [`TreeRow`] per binding or
//! child, each owning its [`PaginatedValueNode`]. Expanding a row pulls the
//! first batch, a "more" row pulls the next one, and collapsing drops the
//! children and swaps in a fresh node so the next expansion starts over.
//!
//! Rows are addressed by their path of child indices from the root list.

use crate::inspector::{
    BatchOutcome, ChildrenSink, InspectResult, InspectorConfig, PaginatedValueNode,
};
use crate::reader::Binding;

/// One value row and the children materialized so far
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub label: String,
    pub node: PaginatedValueNode,
    pub expanded: bool,
    pub children: Vec<TreeRow>,
    /// Children the last batch left for later
    pub more: Option<usize>,
    /// Message of the last failed batch
    pub error: Option<String>,
    pub show_full_value: bool,
}

impl TreeRow {
    pub fn new(label: String, node: PaginatedValueNode) -> Self {
        TreeRow {
            label,
            node,
            expanded: false,
            children: Vec::new(),
            more: None,
            error: None,
            show_full_value: false,
        }
    }
}

/// Appends batch children as collapsed rows
struct RowSink<'a>(&'a mut Vec<TreeRow>);

impl ChildrenSink for RowSink<'_> {
    fn append(&mut self, label: String, child: PaginatedValueNode) {
        self.0.push(TreeRow::new(label, child));
    }
}

/// What a visible line stands for
#[derive(Debug, Clone, Copy)]
pub enum RowKind<'a> {
    Value(&'a TreeRow),
    /// "N more items" placeholder under an expanded row
    More(usize),
    /// Failed batch under an expanded row
    Error(&'a str),
}

/// A line of the flattened tree
#[derive(Debug, Clone)]
pub struct VisibleRow<'a> {
    /// Path of the value row; for `More` and `Error`, the path of their parent
    pub path: Vec<usize>,
    pub depth: usize,
    pub kind: RowKind<'a>,
}

pub struct VariablesTree {
    roots: Vec<TreeRow>,
    config: InspectorConfig,
}

impl VariablesTree {
    pub fn new(bindings: Vec<Binding>, config: InspectorConfig) -> Self {
        let roots = bindings
            .into_iter()
            .map(|binding| TreeRow::new(binding.name, PaginatedValueNode::new(binding.value)))
            .collect();
        VariablesTree { roots, config }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn roots(&self) -> &[TreeRow] {
        &self.roots
    }

    /// Rows in display order
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        for (idx, row) in self.roots.iter().enumerate() {
            path.push(idx);
            push_visible(&mut rows, &mut path, row);
            path.pop();
        }
        rows
    }

    pub fn row(&self, path: &[usize]) -> Option<&TreeRow> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.roots.get(*first)?, |row, idx| row.children.get(*idx))
    }

    fn row_mut(&mut self, path: &[usize]) -> Option<&mut TreeRow> {
        let (first, rest) = path.split_first()?;
        let mut row = self.roots.get_mut(*first)?;
        for idx in rest {
            row = row.children.get_mut(*idx)?;
        }
        Some(row)
    }

    /// Expand a collapsed row, loading its first batch.
    ///
    /// Returns `Ok(None)` when there is nothing to expand.
    pub fn expand(&mut self, path: &[usize]) -> InspectResult<Option<BatchOutcome>> {
        let config = self.config;
        let Some(row) = self.row_mut(path) else {
            return Ok(None);
        };
        if row.expanded || !row.node.has_children() {
            return Ok(None);
        }
        row.expanded = true;
        load_batch(row, &config).map(Some)
    }

    /// Collapse a row; the next expansion starts from a fresh node
    pub fn collapse(&mut self, path: &[usize]) -> bool {
        let Some(row) = self.row_mut(path) else {
            return false;
        };
        if !row.expanded {
            return false;
        }
        row.expanded = false;
        row.children.clear();
        row.more = None;
        row.error = None;
        row.node = row.node.fresh();
        true
    }

    /// Load the next batch of an expanded row (also retries a failed one)
    pub fn load_more(&mut self, path: &[usize]) -> InspectResult<Option<BatchOutcome>> {
        let config = self.config;
        match self.row_mut(path) {
            Some(row) if row.expanded && row.node.remaining() > 0 => {
                load_batch(row, &config).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Flip the full-value view of a truncated row; returns the new setting
    pub fn toggle_full_value(&mut self, path: &[usize]) -> bool {
        let config = self.config;
        match self.row_mut(path) {
            Some(row) if row.node.presentation(&config).is_truncated() => {
                row.show_full_value = !row.show_full_value;
                row.show_full_value
            }
            _ => false,
        }
    }
}

fn load_batch(row: &mut TreeRow, config: &InspectorConfig) -> InspectResult<BatchOutcome> {
    row.error = None;
    let result = row.node.expand(&mut RowSink(&mut row.children), config);
    match &result {
        Ok(BatchOutcome::MoreRemain(remaining)) => row.more = Some(*remaining),
        Ok(BatchOutcome::Exhausted) => row.more = None,
        Err(err) => {
            row.error = Some(err.to_string());
            row.more = Some(row.node.remaining()).filter(|n| *n > 0);
        }
    }
    result
}

fn push_visible<'a>(rows: &mut Vec<VisibleRow<'a>>, path: &mut Vec<usize>, row: &'a TreeRow) {
    let depth = path.len() - 1;
    rows.push(VisibleRow {
        path: path.clone(),
        depth,
        kind: RowKind::Value(row),
    });
    if !row.expanded {
        return;
    }

    for (idx, child) in row.children.iter().enumerate() {
        path.push(idx);
        push_visible(rows, path, child);
        path.pop();
    }
    if let Some(message) = &row.error {
        rows.push(VisibleRow {
            path: path.clone(),
            depth: depth + 1,
            kind: RowKind::Error(message),
        });
    } else if let Some(remaining) = row.more {
        rows.push(VisibleRow {
            path: path.clone(),
            depth: depth + 1,
            kind: RowKind::More(remaining),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_bindings;

    fn tree(source: &str, batch: usize) -> VariablesTree {
        let config = InspectorConfig::new(batch, 40).unwrap();
        VariablesTree::new(read_bindings(source).unwrap(), config)
    }

    fn labels(tree: &VariablesTree) -> Vec<String> {
        tree.visible_rows()
            .iter()
            .map(|row| match row.kind {
                RowKind::Value(value) => value.label.clone(),
                RowKind::More(n) => format!("+{}", n),
                RowKind::Error(_) => "!".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_expand_shows_more_row() {
        let mut tree = tree("L = [1,2,3,4,5].", 2);

        assert_eq!(tree.expand(&[0]), Ok(Some(BatchOutcome::MoreRemain(3))));
        assert_eq!(labels(&tree), vec!["L", "[1]", "[2]", "+3"]);

        assert_eq!(tree.load_more(&[0]), Ok(Some(BatchOutcome::MoreRemain(1))));
        assert_eq!(tree.load_more(&[0]), Ok(Some(BatchOutcome::Exhausted)));
        assert_eq!(labels(&tree), vec!["L", "[1]", "[2]", "[3]", "[4]", "[5]"]);
        assert_eq!(tree.load_more(&[0]), Ok(None));
    }

    #[test]
    fn test_collapse_resets_pagination() {
        let mut tree = tree("L = [1,2,3].", 2);
        tree.expand(&[0]).unwrap();
        tree.load_more(&[0]).unwrap();

        assert!(tree.collapse(&[0]));
        assert_eq!(labels(&tree), vec!["L"]);
        assert_eq!(tree.row(&[0]).unwrap().node.next_child_index(), 0);

        tree.expand(&[0]).unwrap();
        assert_eq!(labels(&tree), vec!["L", "[1]", "[2]", "+1"]);
    }

    #[test]
    fn test_nested_paths() {
        let mut tree = tree("M = #{a => {x, y}}.\nN = 1.", 10);
        tree.expand(&[0]).unwrap();
        tree.expand(&[0, 0]).unwrap();

        assert_eq!(labels(&tree), vec!["M", "a", "[1]", "[2]", "N"]);
        assert_eq!(tree.expand(&[1]), Ok(None));
        assert_eq!(tree.row(&[0, 0, 1]).unwrap().node.value().to_string(), "y");
    }

    #[test]
    fn test_full_value_only_for_truncated_rows() {
        let mut tree = tree("Short = ok.\nLong = \"a long character list that will not fit\".", 10);

        assert!(!tree.toggle_full_value(&[0]));
        assert!(tree.toggle_full_value(&[1]));
        assert!(tree.row(&[1]).unwrap().show_full_value);
    }
}
