use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, instrument, warn, Span};

use crate::config::ClashConfig;
use crate::error::ClashError;

use super::broad_phase::BroadPhase;
use super::element::{Element, ElementId};
use super::evaluate::{ClashEvaluator, ClashStats};
use super::extract::{ElementSolid, GeometryExtractor};
use super::kernel::GeometryKernel;
use super::method::Method;
use super::model::ElementSource;
use super::selection::SelectionSink;

/// Elements implicated in at least one clash.
pub type ClashSet = HashSet<ElementId>;

/// Clash set plus the counts gathered while computing it.
#[derive(Debug, Clone, Default)]
pub struct ClashReport {
    pub elements: ClashSet,
    pub stats: ClashStats,
    /// Elements considered before the broad phase.
    pub candidates: usize,
    /// Elements kept by the broad phase.
    pub survivors: usize,
    /// World-space solids extracted from the survivors.
    pub solids: usize,
}

impl ClashReport {
    /// The clashing elements in ascending id order.
    #[must_use]
    pub fn sorted(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.elements.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Finds clashing elements in a model.
///
/// The detector holds no per-run state, so one instance can serve concurrent
/// calls.
pub struct ClashDetector<K: GeometryKernel> {
    kernel: K,
    config: ClashConfig,
    selection: Option<Arc<dyn SelectionSink>>,
}

impl<K: GeometryKernel> ClashDetector<K> {
    /// Creates a detector with the default configuration and no selection sink.
    #[must_use]
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            config: ClashConfig::default(),
            selection: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ClashConfig) -> Self {
        self.config = config;
        self
    }

    /// Forwards every result to `sink`.
    #[must_use]
    pub fn with_selection(mut self, sink: Arc<dyn SelectionSink>) -> Self {
        self.selection = Some(sink);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClashConfig {
        &self.config
    }

    #[must_use]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Returns the elements that clash under `method`.
    ///
    /// With `elements` set, exactly those elements are checked. Otherwise the
    /// source's default candidates are, with furniture admitted when
    /// `include_furniture` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ClashError::UnknownElement`] for an id the source does not
    /// know, and [`ClashError::DetectionIncomplete`] when the time budget
    /// runs out.
    pub fn get_collision<S: ElementSource + ?Sized>(
        &self,
        source: &S,
        method: Method,
        elements: Option<&[ElementId]>,
        include_furniture: bool,
    ) -> Result<ClashSet, ClashError> {
        self.detect(source, method, elements, include_furniture)
            .map(|report| report.elements)
    }

    /// Same as [`get_collision`](Self::get_collision), returning the full report.
    ///
    /// # Errors
    ///
    /// See [`get_collision`](Self::get_collision).
    #[instrument(
        skip_all,
        fields(method = %method, candidates = tracing::field::Empty, pairs = tracing::field::Empty)
    )]
    pub fn detect<S: ElementSource + ?Sized>(
        &self,
        source: &S,
        method: Method,
        elements: Option<&[ElementId]>,
        include_furniture: bool,
    ) -> Result<ClashReport, ClashError> {
        let deadline = self.config.time_budget().map(|budget| Instant::now() + budget);

        let candidates = match elements {
            Some(ids) => resolve(source, ids)?,
            None => source.default_candidates(include_furniture),
        };
        Span::current().record("candidates", candidates.len());

        let survivors = BroadPhase::new(
            method,
            self.config.overlap_tolerance,
            self.config.contact_tolerance,
            self.config.containment_tolerance,
        )
        .parallel(self.config.parallel)
        .filter(&candidates);

        let extractor = GeometryExtractor::new(source.solids(), self.config.max_instance_depth);
        let solids: Vec<ElementSolid> = if self.config.parallel {
            survivors
                .par_iter()
                .flat_map_iter(|element| extractor.extract(element))
                .collect()
        } else {
            survivors
                .iter()
                .flat_map(|element| extractor.extract(element))
                .collect()
        };

        let evaluation = ClashEvaluator::new(
            &self.kernel,
            method,
            self.config.volume_epsilon,
            self.config.area_precision,
        )
        .parallel(self.config.parallel)
        .deadline(deadline)
        .run(&solids);
        Span::current().record("pairs", evaluation.stats.pairs);

        if !evaluation.complete {
            warn!(
                settled = evaluation.stats.settled(),
                pairs = evaluation.stats.pairs,
                "time budget exhausted"
            );
            return Err(ClashError::DetectionIncomplete {
                settled: evaluation.stats.settled(),
                pairs: evaluation.stats.pairs,
                partial: evaluation.clashing,
            });
        }

        let report = ClashReport {
            elements: evaluation.clashing,
            stats: evaluation.stats,
            candidates: candidates.len(),
            survivors: survivors.len(),
            solids: solids.len(),
        };
        info!(
            survivors = report.survivors,
            solids = report.solids,
            clashing = report.elements.len(),
            rejected = report.stats.rejected,
            failed = report.stats.failed,
            "clash detection complete"
        );

        if let Some(sink) = &self.selection {
            let selected = report.sorted();
            match panic::catch_unwind(AssertUnwindSafe(|| sink.select(&selected))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!(error = %err, "selection sink rejected clash result"),
                Err(_) => warn!("selection sink panicked"),
            }
        }

        Ok(report)
    }
}

/// Looks up explicit ids, dropping repeats.
fn resolve<'s, S: ElementSource + ?Sized>(
    source: &'s S,
    ids: &[ElementId],
) -> Result<Vec<&'s Element>, ClashError> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut resolved = Vec::with_capacity(ids.len());
    for &id in ids {
        let element = source.element(id).ok_or(ClashError::UnknownElement(id))?;
        if seen.insert(id) {
            resolved.push(element);
        }
    }
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clash::element::Category;
    use crate::clash::geometry::GeometryNode;
    use crate::clash::kernel::RectilinearKernel;
    use crate::clash::model::Model;
    use crate::clash::selection::RecordingSink;
    use crate::error::SelectionError;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;

    fn add_cube(model: &mut Model, id: u64, x: f64) {
        let solid = MakeBox::new(Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 1.0, 1.0))
            .execute(model.solids_mut())
            .unwrap();
        model.add_fitted(
            Element::new(ElementId(id))
                .with_category(Category::Walls)
                .with_geometry(GeometryNode::solid(solid)),
            64,
        );
    }

    fn sequential() -> ClashConfig {
        ClashConfig {
            parallel: false,
            ..ClashConfig::default()
        }
    }

    #[test]
    fn report_counts_each_stage() {
        let mut model = Model::new();
        add_cube(&mut model, 1, 0.0);
        add_cube(&mut model, 2, 0.5);
        add_cube(&mut model, 3, 10.0);

        let detector = ClashDetector::new(RectilinearKernel).with_config(sequential());
        let report = detector.detect(&model, Method::Intersection, None, false).unwrap();
        assert_eq!(report.sorted(), vec![ElementId(1), ElementId(2)]);
        assert_eq!(report.candidates, 3);
        assert_eq!(report.survivors, 2);
        assert_eq!(report.solids, 2);
        assert_eq!(report.stats.clashes, 1);
    }

    #[test]
    fn repeated_ids_are_checked_once() {
        let mut model = Model::new();
        add_cube(&mut model, 1, 0.0);
        let detector = ClashDetector::new(RectilinearKernel);
        let ids = [ElementId(1), ElementId(1)];
        let report = detector
            .detect(&model, Method::Touching, Some(&ids), false)
            .unwrap();
        assert!(report.elements.is_empty());
        assert_eq!(report.candidates, 1);
        assert_eq!(report.survivors, 0);
    }

    #[test]
    fn unknown_id_fails_before_work() {
        let mut model = Model::new();
        add_cube(&mut model, 1, 0.0);
        let detector = ClashDetector::new(RectilinearKernel);
        let ids = [ElementId(1), ElementId(9)];
        let err = detector
            .get_collision(&model, Method::Intersection, Some(&ids), false)
            .unwrap_err();
        assert!(matches!(err, ClashError::UnknownElement(ElementId(9))));
    }

    #[test]
    fn result_is_forwarded_sorted() {
        let mut model = Model::new();
        add_cube(&mut model, 5, 0.0);
        add_cube(&mut model, 2, 1.0);
        let sink = Arc::new(RecordingSink::new());
        let detector = ClashDetector::new(RectilinearKernel).with_selection(sink.clone());

        detector.get_collision(&model, Method::Touching, None, false).unwrap();
        assert_eq!(sink.selections(), vec![vec![ElementId(2), ElementId(5)]]);
    }

    struct OfflineSink;

    impl SelectionSink for OfflineSink {
        fn select(&self, _elements: &[ElementId]) -> Result<(), SelectionError> {
            Err(SelectionError::Unavailable)
        }
    }

    #[test]
    fn sink_failure_is_swallowed() {
        let mut model = Model::new();
        add_cube(&mut model, 1, 0.0);
        add_cube(&mut model, 2, 0.5);
        let detector = ClashDetector::new(RectilinearKernel).with_selection(Arc::new(OfflineSink));
        let set = detector
            .get_collision(&model, Method::Intersection, None, false)
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    struct CrashingSink;

    impl SelectionSink for CrashingSink {
        fn select(&self, _elements: &[ElementId]) -> Result<(), SelectionError> {
            panic!("viewer crashed");
        }
    }

    #[test]
    fn sink_panic_is_swallowed() {
        let mut model = Model::new();
        add_cube(&mut model, 1, 0.0);
        add_cube(&mut model, 2, 0.5);
        let detector = ClashDetector::new(RectilinearKernel).with_selection(Arc::new(CrashingSink));
        let set = detector
            .get_collision(&model, Method::Intersection, None, false)
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn exhausted_budget_reports_partial_result() {
        let mut model = Model::new();
        add_cube(&mut model, 1, 0.0);
        add_cube(&mut model, 2, 0.5);
        let config = ClashConfig {
            time_budget_ms: Some(0),
            ..sequential()
        };
        let detector = ClashDetector::new(RectilinearKernel).with_config(config);
        match detector.get_collision(&model, Method::Intersection, None, false) {
            Err(ClashError::DetectionIncomplete {
                settled,
                pairs,
                partial,
            }) => {
                assert_eq!(settled, 0);
                assert_eq!(pairs, 1);
                assert!(partial.is_empty());
            }
            other => panic!("expected an incomplete run, got {other:?}"),
        }
    }
}
