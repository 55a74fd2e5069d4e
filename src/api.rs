use crate::comparator::{Coord, Source};
use crate::error::LcsResult;
use crate::recorder::StepRecord;
use crate::viz::{VizSession, DEFAULT_STR1, DEFAULT_STR2};
use serde::{Deserialize, Serialize};

/// Query accepted by the step endpoints. Missing strings fall back to the
/// demo pair.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct StepQuery {
    pub str1: Option<String>,
    pub str2: Option<String>,
    pub step: Option<i64>,
}

impl StepQuery {
    pub fn str1(&self) -> &str {
        self.str1.as_deref().unwrap_or(DEFAULT_STR1)
    }

    pub fn str2(&self) -> &str {
        self.str2.as_deref().unwrap_or(DEFAULT_STR2)
    }
}

/// Serialized view of one step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub str1: String,
    pub str2: String,
    pub index: usize,
    pub total_steps: usize,
    pub table: Vec<Vec<u32>>,
    pub cell: Option<Coord>,
    pub source: Option<Source>,
    pub description: String,
    pub final_cell: u32,
    pub best_so_far: u32,
    pub path: Vec<Coord>,
    pub summary: Option<String>,
}

impl StepView {
    pub fn new(session: &VizSession, step: &StepRecord) -> Self {
        Self {
            str1: session.str1().to_string(),
            str2: session.str2().to_string(),
            index: step.index,
            total_steps: session.total_steps(),
            table: step.table.to_rows(),
            cell: step.cell,
            source: step.source,
            description: step.description.clone(),
            final_cell: step.final_cell,
            best_so_far: step.best_so_far,
            path: step.path.clone(),
            summary: step.summary.clone(),
        }
    }
}

/// Service: build the session a query describes.
pub fn open_session(query: &StepQuery) -> LcsResult<VizSession> {
    VizSession::at_step(query.str1(), query.str2(), query.step.unwrap_or(0))
}

/// Service: the JSON view of the step a query points at.
pub fn step_view(query: &StepQuery) -> LcsResult<StepView> {
    let session = open_session(query)?;
    Ok(StepView::new(&session, session.current()))
}
