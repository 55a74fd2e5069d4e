use crate::config::SizeRange;
use crate::error::{LcsError, LcsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// A pre-generated input pair, as stored in `test_cases.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: usize,
    pub str1: String,
    pub str2: String,
    pub len1: usize,
    pub len2: usize,
}

impl TestCase {
    pub fn new(id: usize, str1: String, str2: String) -> Self {
        let len1 = str1.chars().count();
        let len2 = str2.chars().count();
        Self {
            id,
            str1,
            str2,
            len1,
            len2,
        }
    }
}

/// `len` symbols drawn uniformly from `alphabet`.
pub fn random_sequence(
    rng: &mut fastrand::Rng,
    len: usize,
    alphabet: &[char],
) -> LcsResult<String> {
    if alphabet.is_empty() {
        return Err(LcsError::Validation(
            "cannot draw symbols from an empty alphabet".to_string(),
        ));
    }
    Ok((0..len)
        .map(|_| alphabet[rng.usize(..alphabet.len())])
        .collect())
}

/// `cases` fresh pairs for every (len1, len2) combination of `range`, in
/// nested-loop order.
pub fn generate_test_cases(
    range: &SizeRange,
    cases: usize,
    alphabet: &[char],
    rng: &mut fastrand::Rng,
) -> LcsResult<Vec<TestCase>> {
    let lengths = range.lengths();
    let mut out = Vec::with_capacity(lengths.len() * lengths.len() * cases);

    for &len1 in &lengths {
        for &len2 in &lengths {
            for _ in 0..cases {
                let str1 = random_sequence(rng, len1, alphabet)?;
                let str2 = random_sequence(rng, len2, alphabet)?;
                out.push(TestCase::new(out.len(), str1, str2));
            }
        }
    }
    Ok(out)
}

pub fn save_test_cases<P: AsRef<Path>>(path: P, cases: &[TestCase]) -> LcsResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(cases)?)?;
    info!("Saved {} test cases to {}", cases.len(), path.display());
    Ok(())
}

/// Loads a case file, rejecting entries whose declared lengths disagree with
/// their strings.
pub fn load_test_cases<P: AsRef<Path>>(path: P) -> LcsResult<Vec<TestCase>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let cases: Vec<TestCase> = serde_json::from_str(&content)?;

    for case in &cases {
        let (l1, l2) = (case.str1.chars().count(), case.str2.chars().count());
        if l1 != case.len1 || l2 != case.len2 {
            return Err(LcsError::Validation(format!(
                "test case {} declares lengths ({}, {}) but holds ({}, {})",
                case.id, case.len1, case.len2, l1, l2
            )));
        }
    }
    Ok(cases)
}
