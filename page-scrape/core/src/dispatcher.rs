// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::partition::{partition_with, Partition, PartitionError, RemainderPolicy, WorkAssignment};
use crate::shutdown_signal::ShutdownSignal;
use crate::worker_runtime::WorkerRuntime;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("cannot partition work: {0}")]
    Partition(#[from] PartitionError),
}

/// Why a worker did not report a result
#[derive(Debug)]
pub enum WorkerFailure<E> {
    /// The job itself returned an error
    Job(E),
    /// Joining the worker failed (panic, aborted task)
    Crashed(String),
    /// The worker exited without reporting
    Lost,
    /// Shutdown was requested before the worker was spawned
    Cancelled,
    /// Shutdown stopped the worker before it finished its share
    Interrupted { completed: usize },
}

impl<E: fmt::Display> fmt::Display for WorkerFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerFailure::Job(e) => write!(f, "job failed: {}", e),
            WorkerFailure::Crashed(msg) => write!(f, "worker crashed: {}", msg),
            WorkerFailure::Lost => write!(f, "worker exited without reporting"),
            WorkerFailure::Cancelled => write!(f, "cancelled before start"),
            WorkerFailure::Interrupted { completed } => {
                write!(f, "interrupted after {} units", completed)
            }
        }
    }
}

#[derive(Debug)]
pub struct WorkerOutcome<E> {
    pub worker_id: usize,
    pub assigned: usize,
    pub result: Result<usize, WorkerFailure<E>>,
}

#[derive(Debug)]
pub struct DispatchReport<E> {
    partition: Partition,
    outcomes: Vec<WorkerOutcome<E>>,
}

impl<E> DispatchReport<E> {
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// One outcome per worker, in worker order
    pub fn outcomes(&self) -> &[WorkerOutcome<E>] {
        &self.outcomes
    }

    pub fn completed_units(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(completed) | Err(WorkerFailure::Interrupted { completed }) => *completed,
                Err(_) => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &WorkerOutcome<E>> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Dispatcher turns a partition into running workers, one per entry
/// Generic over the execution model and the shutdown mechanism
pub struct Dispatcher<R: WorkerRuntime, S: ShutdownSignal> {
    worker_count: usize,
    policy: RemainderPolicy,
    shutdown: S,
    _runtime: PhantomData<fn() -> R>,
}

impl<R: WorkerRuntime, S: ShutdownSignal> Dispatcher<R, S> {
    pub fn new(worker_count: usize, policy: RemainderPolicy, shutdown: S) -> Self {
        Self {
            worker_count,
            policy,
            shutdown,
            _runtime: PhantomData,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Partitions `total_units` and runs `job` once per worker
    ///
    /// Every worker is spawned, including those with a zero share. The call
    /// returns once all workers have been joined; the job reports how many
    /// of its units it completed. A worker that falls short of its share
    /// while shutdown is raised is reported as `Interrupted`.
    pub async fn dispatch<J, Fut, E>(
        &self,
        total_units: usize,
        job: J,
    ) -> Result<DispatchReport<E>, DispatchError>
    where
        J: Fn(WorkAssignment, S) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = Result<usize, E>> + Send + 'static,
        E: Send + 'static,
    {
        let partition = partition_with(total_units, self.worker_count, self.policy)?;
        info!(
            total_units,
            workers = partition.worker_count(),
            shares = ?partition.shares(),
            "Partitioned work"
        );

        if self.shutdown.is_cancelled() {
            warn!("Shutdown requested before dispatch, no workers spawned");
            let outcomes = partition
                .assignments()
                .map(|assignment| WorkerOutcome {
                    worker_id: assignment.worker_id,
                    assigned: assignment.units,
                    result: Err(WorkerFailure::Cancelled),
                })
                .collect();
            return Ok(DispatchReport {
                partition,
                outcomes,
            });
        }

        let (outcome_tx, mut outcome_rx) =
            mpsc::channel::<(usize, Result<usize, E>)>(partition.worker_count());

        let mut handles = Vec::with_capacity(partition.worker_count());
        for assignment in partition.assignments() {
            let worker_id = assignment.worker_id;
            let job = job.clone();
            let shutdown = self.shutdown.clone();
            let tx = outcome_tx.clone();

            debug!(worker_id, units = assignment.units, "Spawning worker");
            let handle = R::spawn(move || async move {
                let result = job(assignment, shutdown).await;
                let _ = tx.send((worker_id, result)).await;
            });
            handles.push((worker_id, handle));
        }
        drop(outcome_tx);

        let mut crashed: HashMap<usize, String> = HashMap::new();
        for (worker_id, handle) in handles {
            if let Err(e) = R::join(handle).await {
                error!(worker_id, error = %e, "Worker failed to join");
                crashed.insert(worker_id, e.to_string());
            }
        }

        let mut results: Vec<Option<Result<usize, E>>> =
            std::iter::repeat_with(|| None).take(partition.worker_count()).collect();
        while let Some((worker_id, result)) = outcome_rx.recv().await {
            if let Some(slot) = results.get_mut(worker_id) {
                *slot = Some(result);
            }
        }

        let outcomes: Vec<WorkerOutcome<E>> = partition
            .assignments()
            .zip(results)
            .map(|(assignment, result)| {
                let result = match result {
                    Some(Ok(completed))
                        if completed < assignment.units && self.shutdown.is_cancelled() =>
                    {
                        Err(WorkerFailure::Interrupted { completed })
                    }
                    Some(Ok(completed)) => Ok(completed),
                    Some(Err(e)) => Err(WorkerFailure::Job(e)),
                    None => match crashed.remove(&assignment.worker_id) {
                        Some(msg) => Err(WorkerFailure::Crashed(msg)),
                        None => Err(WorkerFailure::Lost),
                    },
                };
                WorkerOutcome {
                    worker_id: assignment.worker_id,
                    assigned: assignment.units,
                    result,
                }
            })
            .collect();

        info!(
            workers = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            "All workers joined"
        );

        Ok(DispatchReport {
            partition,
            outcomes,
        })
    }
}
