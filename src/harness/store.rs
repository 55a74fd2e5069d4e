use super::TrialRecord;
use crate::error::{LcsError, LcsResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV-backed result set. Every save rewrites the whole file through a
/// temporary sibling and a rename, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, records: &[TrialRecord]) -> LcsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp)?;
            writer.write_record(TrialRecord::HEADERS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!("Persisted {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> LcsResult<Vec<TrialRecord>> {
        if !self.exists() {
            return Err(LcsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("result file '{}' not found", self.path.display()),
            )));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        for expected in TrialRecord::HEADERS {
            if !headers.iter().any(|h| h == expected) {
                return Err(LcsError::Validation(format!(
                    "'{}' is missing column '{}'",
                    self.path.display(),
                    expected
                )));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: TrialRecord = row?;
            if record.product_length != record.str1_length * record.str2_length {
                return Err(LcsError::Validation(format!(
                    "case {}: product_length {} does not match {} x {}",
                    record.case_id, record.product_length, record.str1_length, record.str2_length
                )));
            }
            records.push(record);
        }
        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Removes a stale result file before a fresh run.
    pub fn clear(&self) -> LcsResult<()> {
        if self.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Accumulator {
    dp_sum: f64,
    dp_count: usize,
    bf_sum: f64,
    bf_count: usize,
}

impl Accumulator {
    fn mean(sum: f64, count: usize) -> Option<f64> {
        (count > 0).then(|| sum / count as f64)
    }
}

/// Joins a DP-only pass and a brute-force-only pass by length pair.
///
/// The two passes ran on different random inputs, so the join is only an
/// aggregate comparison. Repeated length pairs are averaged, speedups are
/// recomputed, and the result is ordered by product with fresh case ids.
pub fn merge_passes(dp: &[TrialRecord], bf: &[TrialRecord]) -> Vec<TrialRecord> {
    let mut order: Vec<(usize, usize)> = Vec::new();
    let mut groups: HashMap<(usize, usize), Accumulator> = HashMap::new();

    fn entry<'a>(
        order: &mut Vec<(usize, usize)>,
        groups: &'a mut HashMap<(usize, usize), Accumulator>,
        key: (usize, usize),
    ) -> &'a mut Accumulator {
        if !groups.contains_key(&key) {
            order.push(key);
        }
        groups.entry(key).or_default()
    }

    for rec in dp {
        if let Some(t) = rec.dp_time {
            let acc = entry(&mut order, &mut groups, (rec.str1_length, rec.str2_length));
            acc.dp_sum += t;
            acc.dp_count += 1;
        }
    }
    for rec in bf {
        if let Some(t) = rec.brute_force_time {
            let acc = entry(&mut order, &mut groups, (rec.str1_length, rec.str2_length));
            acc.bf_sum += t;
            acc.bf_count += 1;
        }
    }

    let mut merged: Vec<TrialRecord> = order
        .iter()
        .map(|&(len1, len2)| {
            let acc = &groups[&(len1, len2)];
            let mut rec = TrialRecord::new(0, len1, len2);
            rec.dp_time = Accumulator::mean(acc.dp_sum, acc.dp_count);
            rec.brute_force_time = Accumulator::mean(acc.bf_sum, acc.bf_count);
            rec.refresh_speedup();
            rec
        })
        .collect();

    merged.sort_by_key(|r| r.product_length);
    for (i, rec) in merged.iter_mut().enumerate() {
        rec.case_id = i;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dp_rec(len1: usize, len2: usize, t: f64) -> TrialRecord {
        let mut r = TrialRecord::new(0, len1, len2);
        r.dp_time = Some(t);
        r
    }

    fn bf_rec(len1: usize, len2: usize, t: f64) -> TrialRecord {
        let mut r = TrialRecord::new(0, len1, len2);
        r.brute_force_time = Some(t);
        r
    }

    #[test]
    fn test_merge_averages_duplicates() {
        let dp = vec![dp_rec(2, 2, 1.0), dp_rec(2, 2, 3.0), dp_rec(1, 1, 1.0)];
        let bf = vec![bf_rec(2, 2, 8.0)];
        let merged = merge_passes(&dp, &bf);

        assert_eq!(merged.len(), 2);
        assert_eq!((merged[0].str1_length, merged[0].case_id), (1, 0));
        assert_eq!(merged[0].speedup, None);
        assert_eq!(merged[1].dp_time, Some(2.0));
        assert_eq!(merged[1].speedup, Some(4.0));
    }

    #[test]
    fn test_merge_keeps_bf_only_pairs() {
        let merged = merge_passes(&[], &[bf_rec(3, 1, 0.5)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].dp_time, None);
        assert_eq!(merged[0].brute_force_time, Some(0.5));
    }
}
