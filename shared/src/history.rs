use crate::stroke::Stroke;

/// Stroke log plus the undo marks and redo groups that slice it.
///
/// Each drag pushes one mark at the log length before its first segment, so
/// popping a mark and truncating the log exactly removes that drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeHistory {
    log: Vec<Stroke>,
    marks: Vec<usize>,
    redo: Vec<Vec<Stroke>>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new undo group. Any undone groups are dropped: they belong to
    /// a timeline the user has drawn over.
    pub fn begin_group(&mut self) {
        self.marks.push(self.log.len());
        self.redo.clear();
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.log.push(stroke);
    }

    pub fn undo(&mut self) -> Option<&[Stroke]> {
        let mark = self.marks.pop()?;
        let group = self.log.split_off(mark.min(self.log.len()));
        self.redo.push(group);
        self.redo.last().map(Vec::as_slice)
    }

    /// Re-appends the most recent undone group and returns it.
    pub fn redo(&mut self) -> Option<&[Stroke]> {
        let group = self.redo.pop()?;
        let start = self.log.len();
        self.marks.push(start);
        self.log.extend(group);
        Some(&self.log[start..])
    }

    /// Replaces the log wholesale. Loaded strokes are not undoable.
    pub fn replace_log(&mut self, strokes: Vec<Stroke>) {
        self.log = strokes;
        self.marks.clear();
        self.redo.clear();
    }

    pub fn clear(&mut self) {
        self.log.clear();
        self.marks.clear();
        self.redo.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.log
    }

    pub fn marks(&self) -> &[usize] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.marks.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Point, StrokeStyle};

    fn segment(id: usize) -> Stroke {
        let at = id as f64;
        Stroke::segment(
            Point::new(at, at),
            Point::new(at + 1.0, at + 1.0),
            StrokeStyle::default(),
            at,
        )
    }

    fn drag(history: &mut StrokeHistory, first: usize, segments: usize) {
        history.begin_group();
        for id in first..first + segments {
            history.push(segment(id));
        }
    }

    #[test]
    fn undoing_every_drag_empties_the_log() {
        let mut history = StrokeHistory::new();
        for index in 0..5 {
            drag(&mut history, index * 10, index + 1);
        }
        assert_eq!(history.marks().len(), 5);
        for _ in 0..5 {
            assert!(history.undo().is_some());
        }
        assert!(history.is_empty());
        assert!(history.undo().is_none());
    }

    #[test]
    fn undo_then_redo_restores_log_and_lower_marks() {
        let mut history = StrokeHistory::new();
        drag(&mut history, 0, 3);
        drag(&mut history, 10, 2);
        drag(&mut history, 20, 4);
        let log_before = history.strokes().to_vec();
        let marks_before = history.marks().to_vec();

        history.undo();
        assert_eq!(history.marks(), &marks_before[..2]);
        let restored = history.redo().map(<[Stroke]>::to_vec);

        assert_eq!(restored.as_deref(), Some(&log_before[5..]));
        assert_eq!(history.strokes(), log_before.as_slice());
        assert_eq!(history.marks(), marks_before.as_slice());
    }

    #[test]
    fn redo_restores_groups_in_lifo_order() {
        let mut history = StrokeHistory::new();
        drag(&mut history, 0, 2);
        drag(&mut history, 10, 1);
        drag(&mut history, 20, 3);
        let full = history.strokes().to_vec();

        let third = history.undo().map(<[Stroke]>::to_vec).unwrap();
        let second = history.undo().map(<[Stroke]>::to_vec).unwrap();
        assert_eq!(third, full[3..].to_vec());
        assert_eq!(second, full[2..3].to_vec());
        assert_eq!(history.redo_len(), 2);

        assert_eq!(history.redo().map(<[Stroke]>::to_vec), Some(second));
        assert_eq!(history.redo().map(<[Stroke]>::to_vec), Some(third));
        assert!(history.redo().is_none());
        assert_eq!(history.strokes(), full.as_slice());
    }

    #[test]
    fn new_drag_discards_redo_groups() {
        let mut history = StrokeHistory::new();
        drag(&mut history, 0, 2);
        history.undo();
        assert!(history.can_redo());

        drag(&mut history, 10, 1);
        assert!(!history.can_redo());
        assert_eq!(history.marks(), &[0]);
    }

    #[test]
    fn empty_drag_is_still_one_undo_step() {
        let mut history = StrokeHistory::new();
        drag(&mut history, 0, 2);
        history.begin_group();
        assert_eq!(history.undo().map(<[Stroke]>::len), Some(0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn replace_log_drops_marks_and_redo() {
        let mut history = StrokeHistory::new();
        drag(&mut history, 0, 2);
        history.undo();
        history.replace_log(vec![segment(7)]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }
}
