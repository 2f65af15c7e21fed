//! Bounded worker pool for alternate-path enumeration.
//!
//! Enumeration jobs are independent: each one owns a private pruned copy
//! of the requirement graph, so workers share no mutable state. Results
//! are collected in submission order, independent of completion order,
//! which keeps constraint emission and the final report reproducible.

use crate::synthesis::alternates::{EnumerationJob, EnumerationOutcome};
use crate::Error;
use log::{debug, info};
use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

/// Run all enumeration jobs on a pool sized to the available hardware
/// parallelism, returning the outcomes in submission order.
pub fn run_jobs(jobs: Vec<EnumerationJob>) -> Result<Vec<EnumerationOutcome>, Error> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }
    let total = jobs.len();
    let workers = num_cpus::get().min(total).max(1);
    info!("enumerating {} requirements on {} workers", total, workers);

    let queue = Arc::new(Mutex::new(VecDeque::from(jobs)));
    let (tx, rx) = mpsc::channel();

    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        handles.push(thread::spawn(move || loop {
            let job = queue.lock().unwrap().pop_front();
            match job {
                Some(job) => {
                    debug!("worker {} picked requirement {}", worker, job.name);
                    let index = job.index;
                    if tx.send((index, job.run())).is_err() {
                        // collector is gone, stop working
                        break;
                    }
                }
                None => break,
            }
        }));
    }
    drop(tx);

    let mut slots: Vec<Option<Result<EnumerationOutcome, Error>>> =
        (0..total).map(|_| None).collect();
    for (index, outcome) in rx {
        slots[index] = Some(outcome);
    }
    for handle in handles {
        handle.join().map_err(|_| Error::WorkerFailed)?;
    }

    let mut outcomes = Vec::with_capacity(total);
    for slot in slots {
        outcomes.push(slot.ok_or(Error::WorkerFailed)??);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::{Path, PathMode, Requirement};
    use crate::synthesis::reqgraph::RequirementGraph;

    fn path(hops: &[&str]) -> Path {
        Path::new(hops.iter().map(|h| h.to_string()).collect())
    }

    fn jobs_for(policy: &[Requirement]) -> Vec<EnumerationJob> {
        let rg = RequirementGraph::build(policy);
        policy
            .iter()
            .enumerate()
            .map(|(index, req)| EnumerationJob {
                index,
                name: req.name.clone(),
                mode: req.mode,
                paths: req.paths.iter().map(|p| rg.resolve_path(p).unwrap()).collect(),
                labels: req.paths.iter().map(|p| p.hops.clone()).collect(),
                graph: rg.pruned(req.exclusion.as_ref()),
            })
            .collect()
    }

    #[test]
    fn test_empty_job_list() {
        assert!(run_jobs(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_results_in_submission_order() {
        let policy: Vec<Requirement> = vec![
            Requirement::new(PathMode::Simple, vec![path(&["A", "B", "D"])], None, "r0"),
            Requirement::new(PathMode::Simple, vec![path(&["A", "C", "D"])], None, "r1"),
            Requirement::new(PathMode::Simple, vec![path(&["A", "E", "D"])], None, "r2"),
            Requirement::new(PathMode::Simple, vec![path(&["D", "A"])], None, "r3"),
        ];
        let outcomes = run_jobs(jobs_for(&policy)).unwrap();
        assert_eq!(outcomes.len(), 4);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.index, i);
        }
        // the three A -> D requirements see each other as alternates
        assert_eq!(outcomes[0].alternates.len(), 2);
        assert_eq!(outcomes[1].alternates.len(), 2);
        assert_eq!(outcomes[2].alternates.len(), 2);
        assert!(outcomes[3].alternates.is_empty());
    }

    #[test]
    fn test_worker_error_propagates() {
        // the exclusion removes an edge of the requirement's own path
        let exc = crate::Exclusion {
            routers: vec![],
            edges: vec![("A".to_string(), "B".to_string())],
        };
        let policy = vec![Requirement::new(
            PathMode::Simple,
            vec![path(&["A", "B", "D"])],
            Some(exc),
            "broken",
        )];
        match run_jobs(jobs_for(&policy)) {
            Err(Error::RequiredPathMissing { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("expected RequiredPathMissing, got {:?}", other),
        }
    }
}
