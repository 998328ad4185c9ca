//! Per-match storage of captured regex groups.

/// Text and offsets of one captured group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    text: String,
    start: usize,
    end: usize,
}

impl Group {
    /// Create a group from its captured text and byte offsets.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Captured text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start offset of the capture.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset of the capture.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }
}

/// Captured groups of a single match, indexed by group number.
///
/// Sized to the element's group count plus group 0 (the whole match). An
/// unset slot means the group did not participate in the match. A store
/// belongs to exactly one processor and therefore to exactly one match.
#[derive(Clone, Debug, Default)]
pub struct CaptureStore {
    groups: Vec<Option<Group>>,
    line_start_offset: usize,
    line_end_offset: usize,
}

impl CaptureStore {
    /// Create a store for an element with `group_count` groups.
    #[must_use]
    pub fn with_group_count(group_count: usize) -> Self {
        Self {
            groups: vec![None; group_count + 1],
            line_start_offset: 0,
            line_end_offset: 0,
        }
    }

    /// Store a captured group.
    ///
    /// A group is immutable once set: a second write to the same index is
    /// ignored, as are indices beyond the declared group count.
    pub fn set(&mut self, index: usize, group: Group) {
        match self.groups.get_mut(index) {
            Some(slot @ None) => *slot = Some(group),
            Some(Some(_)) => tracing::warn!(index, "Ignoring second capture of group"),
            None => tracing::warn!(
                index,
                slots = self.groups.len(),
                "Ignoring capture outside declared group count"
            ),
        }
    }

    /// Group at `index`, if it was captured.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index).and_then(Option::as_ref)
    }

    /// Captured text of group `index`.
    #[must_use]
    pub fn text(&self, index: usize) -> Option<&str> {
        self.get(index).map(Group::text)
    }

    /// Start offset of group `index`.
    #[must_use]
    pub fn start(&self, index: usize) -> Option<usize> {
        self.get(index).map(Group::start)
    }

    /// End offset of group `index`.
    #[must_use]
    pub fn end(&self, index: usize) -> Option<usize> {
        self.get(index).map(Group::end)
    }

    /// Record where the whole match starts and ends within its line.
    pub fn set_line_offsets(&mut self, start: usize, end: usize) {
        self.line_start_offset = start;
        self.line_end_offset = end;
    }

    /// Offset within the line at which the match started.
    #[must_use]
    pub fn line_start_offset(&self) -> usize {
        self.line_start_offset
    }

    /// Offset within the line at which the match ended.
    #[must_use]
    pub fn line_end_offset(&self) -> usize {
        self.line_end_offset
    }
}
