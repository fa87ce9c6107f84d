use dca_core::{anchor::AnchorPoint, series::ProductionSeries};

/// What a click did to the selection.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SelectionOutcome {
    /// The point was added after the existing anchors.
    Appended,
    /// The set was full; it now holds only the clicked point.
    Reset,
    /// The point was already anchored.
    Unchanged,
    /// The index is not inside the current series (or there is none).
    Rejected,
    /// The click landed on a trace that does not take selections.
    Ignored,
}

impl SelectionOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, SelectionOutcome::Appended | SelectionOutcome::Reset)
    }
}

/// Up to two anchors, in pick order. The first becomes `t1/q1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    anchors: Vec<AnchorPoint>,
    revision: u64,
}

impl SelectionSet {
    pub const CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.anchors.len() == Self::CAPACITY
    }

    /// Bumped on every change; used to tag in-flight requests.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Both anchors, when the set is complete.
    pub fn pair(&self) -> Option<(&AnchorPoint, &AnchorPoint)> {
        match self.anchors.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    /// Handle a click on the historical point at `index`.
    ///
    /// A third distinct click does not shift the window: it drops both
    /// anchors and starts over with the clicked point alone.
    pub fn click(&mut self, series: &ProductionSeries, index: usize) -> SelectionOutcome {
        let Some(anchor) = AnchorPoint::capture(series, index) else {
            return SelectionOutcome::Rejected;
        };
        if self.anchors.iter().any(|a| a.index == index) {
            return SelectionOutcome::Unchanged;
        }
        let outcome = if self.anchors.len() >= Self::CAPACITY {
            self.anchors.clear();
            SelectionOutcome::Reset
        } else {
            SelectionOutcome::Appended
        };
        self.anchors.push(anchor);
        self.revision += 1;
        outcome
    }

    /// Drop every anchor. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        if self.anchors.is_empty() {
            return false;
        }
        self.anchors.clear();
        self.revision += 1;
        true
    }
}
