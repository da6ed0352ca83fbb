use crate::model::Stroke;

/// Ordered stroke list plus a cursor marking how many entries are visible.
///
/// `entries[..active]` is the rendered prefix; everything past `active` is
/// redo-available. Appending while undone discards that tail, so the history
/// never branches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Stroke>,
    active: usize,
}

impl History {
    pub fn append(&mut self, stroke: Stroke) {
        self.entries.truncate(self.active);
        self.entries.push(stroke);
        self.active = self.entries.len();
    }

    /// Steps the cursor back one stroke. Returns whether anything changed;
    /// at the lower bound this is a no-op.
    pub fn undo(&mut self) -> bool {
        if self.active == 0 {
            return false;
        }
        self.active -= 1;
        true
    }

    /// Steps the cursor forward one stroke. No-op at the upper bound.
    pub fn redo(&mut self) -> bool {
        if self.active == self.entries.len() {
            return false;
        }
        self.active += 1;
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.active = 0;
    }

    pub fn active_strokes(&self) -> &[Stroke] {
        &self.entries[..self.active]
    }

    pub fn can_undo(&self) -> bool {
        self.active > 0
    }

    pub fn can_redo(&self) -> bool {
        self.active < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_len(&self) -> usize {
        self.active
    }
}
