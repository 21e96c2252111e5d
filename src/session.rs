//! Overlay state for one open/close cycle of the palette
//!
//! Holds the search text, the filtered and grouped view of the registry, and
//! the highlighted row. Only the engine mutates it; renderers read it through
//! the getters.

use crate::filter::ListFilter;
use crate::registry::{Command, Registry};

/// Commands of one group, as registry indices in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub name: String,
    pub commands: Vec<usize>,
}

/// The grouped, filtered command list.
///
/// Rows are addressed by their flattened position across groups, which is the
/// order a renderer draws them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleCommands {
    groups: Vec<GroupView>,
}

impl VisibleCommands {
    /// Group registry indices by command group.
    ///
    /// Groups appear in the order they are first seen in `indices`, and each
    /// group keeps the relative order of its commands.
    pub fn group(registry: &Registry, indices: &[usize]) -> Self {
        let mut groups: Vec<GroupView> = Vec::new();

        for &idx in indices {
            let Some(command) = registry.at(idx) else {
                continue;
            };
            match groups.iter_mut().find(|g| g.name == command.group) {
                Some(group) => group.commands.push(idx),
                None => groups.push(GroupView {
                    name: command.group.clone(),
                    commands: vec![idx],
                }),
            }
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[GroupView] {
        &self.groups
    }

    /// Number of visible rows
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.commands.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.commands.is_empty())
    }

    /// Registry index of the row at `position`
    pub fn get(&self, position: usize) -> Option<usize> {
        self.iter().nth(position)
    }

    /// Row position of a registry index, if visible
    pub fn position(&self, registry_idx: usize) -> Option<usize> {
        self.iter().position(|idx| idx == registry_idx)
    }

    /// Registry indices in display order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().flat_map(|g| g.commands.iter().copied())
    }
}

/// Engine-owned palette state
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    is_open: bool,
    query: String,
    visible: VisibleCommands,
    highlighted: Option<usize>,
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Current search text
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_commands(&self) -> &VisibleCommands {
        &self.visible
    }

    /// Row position of the highlighted command; `None` when nothing is visible
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted command, resolved against the registry
    pub fn highlighted_command<'r>(&self, registry: &'r Registry) -> Option<&'r Command> {
        self.highlighted
            .and_then(|pos| self.visible.get(pos))
            .and_then(|idx| registry.at(idx))
    }

    /// Start a fresh session: empty query, full registry, first row highlighted
    pub(crate) fn open(&mut self, registry: &Registry, filter: &mut dyn ListFilter) {
        self.is_open = true;
        self.set_query(registry, filter, "");
    }

    /// Discard the session
    pub(crate) fn close(&mut self) {
        *self = Self::default();
    }

    /// Replace the search text and recompute the visible view
    pub(crate) fn set_query(
        &mut self,
        registry: &Registry,
        filter: &mut dyn ListFilter,
        text: &str,
    ) {
        self.query = text.to_string();

        let labels: Vec<&str> = registry.iter().map(|c| c.label.as_str()).collect();
        let matched = filter.filter(&labels, text);
        self.visible = VisibleCommands::group(registry, &matched);
        self.highlighted = if self.visible.is_empty() { None } else { Some(0) };
    }

    /// Move the highlight by `delta` rows, wrapping at both ends
    pub(crate) fn move_selection(&mut self, delta: isize) {
        let len = self.visible.len();
        let Some(current) = self.highlighted else {
            return;
        };
        if len == 0 {
            return;
        }

        let next = (current as isize + delta).rem_euclid(len as isize);
        self.highlighted = Some(next as usize);
    }

    /// Highlight the first or last row
    pub(crate) fn select_edge(&mut self, last: bool) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(if last { len - 1 } else { 0 });
    }

    /// Highlight a specific registry entry if it is visible
    pub(crate) fn highlight(&mut self, registry_idx: usize) -> bool {
        match self.visible.position(registry_idx) {
            Some(pos) => {
                self.highlighted = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Registry index of the highlighted command; `None` when nothing is visible
    pub(crate) fn confirm_selection(&self) -> Option<usize> {
        self.highlighted.and_then(|pos| self.visible.get(pos))
    }
}
