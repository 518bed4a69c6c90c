// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How the units left over after the even split are handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Every worker gets `total / workers`, the last one also takes `total % workers`
    #[default]
    LastWorker,
    /// The first `total % workers` workers get one extra unit each
    Spread,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(i64),

    #[error("total units must not be negative, got {0}")]
    NegativeTotalUnits(i64),
}

/// Per-worker unit counts, in worker order
///
/// Always holds exactly one entry per worker and the entries always sum
/// to the total that was partitioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    shares: Box<[usize]>,
}

/// One worker's share of the work together with the unit indices it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkAssignment {
    pub worker_id: usize,
    pub units: usize,
    pub range: Range<usize>,
}

impl Partition {
    pub fn shares(&self) -> &[usize] {
        &self.shares
    }

    pub fn worker_count(&self) -> usize {
        self.shares.len()
    }

    pub fn total_units(&self) -> usize {
        self.shares.iter().sum()
    }

    pub fn share(&self, worker_id: usize) -> Option<usize> {
        self.shares.get(worker_id).copied()
    }

    /// Assignments in worker order; consecutive ranges are adjacent and
    /// together cover `0..total_units`
    pub fn assignments(&self) -> impl Iterator<Item = WorkAssignment> + '_ {
        self.shares
            .iter()
            .enumerate()
            .scan(0usize, |start, (worker_id, &units)| {
                let range = *start..*start + units;
                *start += units;
                Some(WorkAssignment {
                    worker_id,
                    units,
                    range,
                })
            })
    }
}

impl std::ops::Deref for Partition {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.shares
    }
}

/// Splits `total_units` across `worker_count` workers, remainder to the last worker
pub fn partition(total_units: usize, worker_count: usize) -> Result<Partition, PartitionError> {
    partition_with(total_units, worker_count, RemainderPolicy::LastWorker)
}

pub fn partition_with(
    total_units: usize,
    worker_count: usize,
    policy: RemainderPolicy,
) -> Result<Partition, PartitionError> {
    if worker_count == 0 {
        return Err(PartitionError::InvalidWorkerCount(0));
    }

    let base_share = total_units / worker_count;
    let remainder = total_units % worker_count;

    let shares: Box<[usize]> = match policy {
        RemainderPolicy::LastWorker => (0..worker_count)
            .map(|worker_id| {
                if worker_id == worker_count - 1 {
                    base_share + remainder
                } else {
                    base_share
                }
            })
            .collect(),
        RemainderPolicy::Spread => (0..worker_count)
            .map(|worker_id| base_share + usize::from(worker_id < remainder))
            .collect(),
    };

    Ok(Partition { shares })
}

/// Same as [`partition_with`] for callers holding signed integers
pub fn partition_signed(
    total_units: i64,
    worker_count: i64,
    policy: RemainderPolicy,
) -> Result<Partition, PartitionError> {
    let workers =
        usize::try_from(worker_count).map_err(|_| PartitionError::InvalidWorkerCount(worker_count))?;
    if workers == 0 {
        return Err(PartitionError::InvalidWorkerCount(worker_count));
    }
    let total =
        usize::try_from(total_units).map_err(|_| PartitionError::NegativeTotalUnits(total_units))?;

    partition_with(total, workers, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_last_worker() {
        assert_eq!(partition(100, 8).unwrap().shares(), &[12, 12, 12, 12, 12, 12, 12, 16]);
        assert_eq!(partition(100, 4).unwrap().shares(), &[25, 25, 25, 25]);
        assert_eq!(partition(0, 4).unwrap().shares(), &[0, 0, 0, 0]);
        assert_eq!(partition(5, 8).unwrap().shares(), &[0, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(partition(7, 1).unwrap().shares(), &[7]);
        assert_eq!(partition(10, 4).unwrap().shares(), &[2, 2, 2, 4]);
    }

    #[test]
    fn test_partition_spread() {
        let spread = |t, w| partition_with(t, w, RemainderPolicy::Spread).unwrap();
        assert_eq!(spread(100, 8).shares(), &[13, 13, 13, 13, 12, 12, 12, 12]);
        assert_eq!(spread(5, 8).shares(), &[1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(spread(0, 3).shares(), &[0, 0, 0]);
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        assert_eq!(partition(10, 0), Err(PartitionError::InvalidWorkerCount(0)));
        assert_eq!(
            partition_with(0, 0, RemainderPolicy::Spread),
            Err(PartitionError::InvalidWorkerCount(0))
        );
    }

    #[test]
    fn test_signed_inputs() {
        let policy = RemainderPolicy::LastWorker;
        assert_eq!(
            partition_signed(10, 0, policy),
            Err(PartitionError::InvalidWorkerCount(0))
        );
        assert_eq!(
            partition_signed(10, -3, policy),
            Err(PartitionError::InvalidWorkerCount(-3))
        );
        assert_eq!(
            partition_signed(-1, 4, policy),
            Err(PartitionError::NegativeTotalUnits(-1))
        );
        assert_eq!(partition_signed(9, 2, policy).unwrap().shares(), &[4, 5]);
    }

    #[test]
    fn test_assignments_cover_units_contiguously() {
        let partition = partition(10, 4).unwrap();
        let ranges: Vec<_> = partition.assignments().map(|a| a.range).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..10]);

        let last = partition.assignments().last().unwrap();
        assert_eq!(last.worker_id, 3);
        assert_eq!(last.units, 4);
    }
}
