use super::generator::TestCase;
use crate::config::SizeRange;

/// Where a trial's inputs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialInputs {
    /// Drawn fresh from the harness RNG when the trial runs.
    Generated,
    /// A stored test case.
    Fixed { id: usize, str1: String, str2: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSpec {
    pub len1: usize,
    pub len2: usize,
    pub inputs: TrialInputs,
}

impl TrialSpec {
    pub fn generated(len1: usize, len2: usize) -> Self {
        Self {
            len1,
            len2,
            inputs: TrialInputs::Generated,
        }
    }

    pub fn product(&self) -> usize {
        self.len1 * self.len2
    }
}

/// Every (len1, len2) combination of `range`, smallest product first.
/// The sort is stable, so equal products keep nested-loop order.
pub fn size_pairs(range: &SizeRange) -> Vec<TrialSpec> {
    let lengths = range.lengths();
    let mut plan: Vec<TrialSpec> = lengths
        .iter()
        .flat_map(|&l1| lengths.iter().map(move |&l2| TrialSpec::generated(l1, l2)))
        .collect();
    plan.sort_by_key(TrialSpec::product);
    plan
}

pub fn plan_from_cases(cases: &[TestCase]) -> Vec<TrialSpec> {
    let mut plan: Vec<TrialSpec> = cases
        .iter()
        .map(|c| TrialSpec {
            len1: c.len1,
            len2: c.len2,
            inputs: TrialInputs::Fixed {
                id: c.id,
                str1: c.str1.clone(),
                str2: c.str2.clone(),
            },
        })
        .collect();
    plan.sort_by_key(TrialSpec::product);
    plan
}
