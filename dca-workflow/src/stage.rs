use dca_core::series::ProductionSeries;

use crate::selection::SelectionSet;

/// Labels of the three-step progress indicator, in order.
pub const STEP_LABELS: [&str; 3] = ["Upload Data", "Select Points", "View Results"];

/// Where the user is in the workflow. Always derived, never stored.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WorkflowStage {
    NoData,
    AwaitingSelection { selected: usize },
    ReadyOrComplete { has_result: bool },
}

impl WorkflowStage {
    pub fn derive(
        series: Option<&ProductionSeries>,
        selection: &SelectionSet,
        has_result: bool,
    ) -> Self {
        match series {
            None => WorkflowStage::NoData,
            Some(s) if s.is_empty() => WorkflowStage::NoData,
            Some(_) if !selection.is_complete() => WorkflowStage::AwaitingSelection {
                selected: selection.len(),
            },
            Some(_) => WorkflowStage::ReadyOrComplete { has_result },
        }
    }

    /// 1-based step of the progress indicator. Two anchors without a result
    /// still count as step 2.
    pub fn step(&self) -> usize {
        match self {
            WorkflowStage::NoData => 1,
            WorkflowStage::AwaitingSelection { .. } => 2,
            WorkflowStage::ReadyOrComplete { has_result: false } => 2,
            WorkflowStage::ReadyOrComplete { has_result: true } => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        STEP_LABELS[self.step() - 1]
    }

    pub fn can_forecast(&self) -> bool {
        matches!(self, WorkflowStage::ReadyOrComplete { .. })
    }
}
