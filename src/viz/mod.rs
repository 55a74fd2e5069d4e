//! Step-through state for the interactive DP table view.
//!
//! A [`VizSession`] owns everything one view needs. There is no shared
//! instance: the HTTP layer builds a session from each request's query.

pub mod html;

use crate::error::{LcsError, LcsResult};
use crate::recorder::{Recording, StepRecord};

/// Inputs longer than this are refused; every step snapshots the whole table.
pub const MAX_INPUT_LEN: usize = 40;

pub const DEFAULT_STR1: &str = "ABCDE";
pub const DEFAULT_STR2: &str = "CBDA";

#[derive(Debug, Clone)]
pub struct VizSession {
    str1: String,
    str2: String,
    recording: Recording,
    cursor: usize,
}

impl VizSession {
    /// Upper-cases and trims both inputs, then records the fill.
    pub fn new(str1: &str, str2: &str) -> LcsResult<Self> {
        let str1 = str1.trim().to_uppercase();
        let str2 = str2.trim().to_uppercase();
        for (name, s) in [("str1", &str1), ("str2", &str2)] {
            let len = s.chars().count();
            if len > MAX_INPUT_LEN {
                return Err(LcsError::Validation(format!(
                    "{} has {} symbols, the step view accepts at most {}",
                    name, len, MAX_INPUT_LEN
                )));
            }
        }

        let recording = Recording::from_str_pair(&str1, &str2);
        Ok(Self {
            str1,
            str2,
            recording,
            cursor: 0,
        })
    }

    /// Opens a session positioned at `step` (clamped). Negative steps land on 0.
    pub fn at_step(str1: &str, str2: &str, step: i64) -> LcsResult<Self> {
        let mut session = Self::new(str1, str2)?;
        session.jump(step.max(0) as usize);
        Ok(session)
    }

    pub fn str1(&self) -> &str {
        &self.str1
    }

    pub fn str2(&self) -> &str {
        &self.str2
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.recording.len()
    }

    pub fn current(&self) -> &StepRecord {
        self.recording.step(self.cursor)
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.total_steps()
    }

    pub fn jump(&mut self, step: usize) -> &StepRecord {
        self.cursor = self.recording.clamp(step);
        self.current()
    }

    pub fn advance(&mut self) -> &StepRecord {
        self.jump(self.cursor.saturating_add(1))
    }

    pub fn retreat(&mut self) -> &StepRecord {
        self.jump(self.cursor.saturating_sub(1))
    }

    /// Step indices the previous and next links point at, clamped.
    pub fn neighbours(&self) -> (usize, usize) {
        (
            self.cursor.saturating_sub(1),
            self.recording.clamp(self.cursor + 1),
        )
    }
}
