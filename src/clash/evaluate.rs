use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace};

use super::element::ElementId;
use super::extract::ElementSolid;
use super::kernel::GeometryKernel;
use super::method::Method;
use super::validate::{Rejection, UnionValidator};

/// Verdict for one pair of solids.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Clash,
    NoClash,
    /// The union did not show the solids merging.
    Rejected(Rejection),
    /// Both owners were already known to clash, or a solid was empty.
    Skipped,
    /// The kernel failed on this pair.
    Failed(String),
}

/// Counters over one evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClashStats {
    /// Solid pairs owned by two different elements.
    pub pairs: usize,
    pub clashes: usize,
    pub no_clashes: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ClashStats {
    /// Pairs that reached a verdict or were skipped.
    #[must_use]
    pub fn settled(&self) -> usize {
        self.clashes + self.no_clashes + self.rejected + self.skipped + self.failed
    }
}

/// Result of evaluating every candidate pair.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub clashing: HashSet<ElementId>,
    pub stats: ClashStats,
    /// `false` if the deadline passed before every pair was settled.
    pub complete: bool,
}

#[derive(Default)]
struct Counters {
    pairs: AtomicUsize,
    clashes: AtomicUsize,
    no_clashes: AtomicUsize,
    rejected: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl Counters {
    fn record(&self, outcome: &PairOutcome) {
        let counter = match outcome {
            PairOutcome::Clash => &self.clashes,
            PairOutcome::NoClash => &self.no_clashes,
            PairOutcome::Rejected(_) => &self.rejected,
            PairOutcome::Skipped => &self.skipped,
            PairOutcome::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ClashStats {
        ClashStats {
            pairs: self.pairs.load(Ordering::Relaxed),
            clashes: self.clashes.load(Ordering::Relaxed),
            no_clashes: self.no_clashes.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Decides which elements clash by exact booleans on their solids.
pub struct ClashEvaluator<'k, K: GeometryKernel + ?Sized> {
    kernel: &'k K,
    method: Method,
    volume_epsilon: f64,
    validator: UnionValidator,
    parallel: bool,
    deadline: Option<Instant>,
}

impl<'k, K: GeometryKernel + ?Sized> ClashEvaluator<'k, K> {
    #[must_use]
    pub fn new(kernel: &'k K, method: Method, volume_epsilon: f64, area_precision: u32) -> Self {
        Self {
            kernel,
            method,
            volume_epsilon,
            validator: UnionValidator::new(area_precision),
            parallel: true,
            deadline: None,
        }
    }

    /// Enables or disables the rayon pool.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Abandons the remaining pairs once `deadline` has passed.
    #[must_use]
    pub fn deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Classifies one pair of solids under the evaluator's method.
    ///
    /// Kernel errors and kernel panics become [`PairOutcome::Failed`].
    pub fn evaluate_pair(&self, a: &ElementSolid, b: &ElementSolid) -> PairOutcome {
        panic::catch_unwind(AssertUnwindSafe(|| self.classify(a, b))).unwrap_or_else(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "kernel panicked".to_owned());
            PairOutcome::Failed(reason)
        })
    }

    fn classify(&self, a: &ElementSolid, b: &ElementSolid) -> PairOutcome {
        if a.solid.is_empty() || b.solid.is_empty() {
            return PairOutcome::Skipped;
        }

        let union = match self.kernel.union(&a.solid, &b.solid) {
            Ok(union) => union,
            Err(err) => return PairOutcome::Failed(err.to_string()),
        };
        if let Err(rejection) = self.validator.check(self.kernel, &a.solid, &b.solid, &union) {
            return PairOutcome::Rejected(rejection);
        }

        let intersection = match self.kernel.intersect(&a.solid, &b.solid) {
            Ok(intersection) => intersection,
            Err(err) => return PairOutcome::Failed(err.to_string()),
        };
        let volume = self.kernel.volume(&intersection);
        trace!(first = %a.element, second = %b.element, volume, "intersection measured");

        if self.method.classifies_as_clash(volume, self.volume_epsilon) {
            PairOutcome::Clash
        } else {
            PairOutcome::NoClash
        }
    }

    /// Evaluates every pair of solids owned by different elements.
    ///
    /// One clashing solid pair is enough for both owners to clash. Pairs
    /// whose owners are both already known to clash are skipped.
    pub fn run(&self, solids: &[ElementSolid]) -> Evaluation {
        let clashing: Mutex<HashSet<ElementId>> = Mutex::new(HashSet::new());
        let counters = Counters::default();
        let abandoned = AtomicBool::new(false);

        let settle = |i: usize, j: usize| {
            let (a, b) = (&solids[i], &solids[j]);
            if a.element == b.element {
                return;
            }
            counters.pairs.fetch_add(1, Ordering::Relaxed);

            if abandoned.load(Ordering::Relaxed) {
                return;
            }
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                abandoned.store(true, Ordering::Relaxed);
                return;
            }

            let known = {
                let set = clashing.lock().unwrap_or_else(PoisonError::into_inner);
                set.contains(&a.element) && set.contains(&b.element)
            };
            let outcome = if known {
                PairOutcome::Skipped
            } else {
                self.evaluate_pair(a, b)
            };

            match &outcome {
                PairOutcome::Clash => {
                    let mut set = clashing.lock().unwrap_or_else(PoisonError::into_inner);
                    set.insert(a.element);
                    set.insert(b.element);
                }
                PairOutcome::Failed(reason) => {
                    debug!(first = %a.element, second = %b.element, %reason, "boolean evaluation failed");
                }
                _ => {}
            }
            counters.record(&outcome);
        };

        let row = |i: usize| (i + 1..solids.len()).for_each(|j| settle(i, j));
        if self.parallel {
            (0..solids.len()).into_par_iter().for_each(row);
        } else {
            (0..solids.len()).for_each(row);
        }

        Evaluation {
            clashing: clashing.into_inner().unwrap_or_else(PoisonError::into_inner),
            stats: counters.snapshot(),
            complete: !abandoned.load(Ordering::Relaxed),
        }
    }
}
