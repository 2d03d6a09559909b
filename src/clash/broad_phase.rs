use rayon::prelude::*;
use tracing::debug;

use super::element::Element;
use super::method::Method;
use super::outline::BoundingOutline;

/// Culls elements whose bounding boxes cannot take part in a clash.
///
/// Every unordered pair of outlines is tested, which is cheap next to the
/// boolean evaluation that follows and keeps the filter sound: no pair that
/// could clash under the chosen method is pruned.
#[derive(Debug, Clone, Copy)]
pub struct BroadPhase {
    tolerance: f64,
    containment_tolerance: f64,
    parallel: bool,
}

impl BroadPhase {
    /// Creates a broad phase for `method`.
    ///
    /// Intersections require boxes to overlap by more than
    /// `overlap_tolerance`; touching pairs only need boxes within
    /// `contact_tolerance` of each other.
    #[must_use]
    pub fn new(
        method: Method,
        overlap_tolerance: f64,
        contact_tolerance: f64,
        containment_tolerance: f64,
    ) -> Self {
        let tolerance = match method {
            Method::Intersection => -overlap_tolerance.abs(),
            Method::Touching => contact_tolerance.abs(),
        };
        Self {
            tolerance,
            containment_tolerance: containment_tolerance.abs(),
            parallel: true,
        }
    }

    /// Enables or disables the rayon pool.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The signed tolerance passed to [`BoundingOutline::intersects`].
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns whether the outlines of a pair warrant an exact test.
    #[must_use]
    pub fn retains(&self, a: &BoundingOutline, b: &BoundingOutline) -> bool {
        a.intersects(b, self.tolerance)
            || a.contains(b, self.containment_tolerance)
            || b.contains(a, self.containment_tolerance)
    }

    /// Returns the elements that belong to at least one retained pair, in
    /// input order. Elements without a bounding box are never returned.
    #[must_use]
    pub fn filter<'e>(&self, elements: &[&'e Element]) -> Vec<&'e Element> {
        let outlines: Vec<Option<BoundingOutline>> = elements
            .iter()
            .map(|element| element.bounding_box().map(BoundingOutline::from))
            .collect();

        let partner_of = |i: usize| -> bool {
            let Some(a) = outlines[i].as_ref() else {
                return false;
            };
            outlines
                .iter()
                .enumerate()
                .any(|(j, b)| j != i && b.as_ref().is_some_and(|b| self.retains(a, b)))
        };

        let retained: Vec<bool> = if self.parallel {
            (0..elements.len()).into_par_iter().map(partner_of).collect()
        } else {
            (0..elements.len()).map(partner_of).collect()
        };

        let survivors: Vec<&Element> = elements
            .iter()
            .zip(retained)
            .filter_map(|(element, keep)| keep.then_some(*element))
            .collect();

        debug!(
            candidates = elements.len(),
            survivors = survivors.len(),
            tolerance = self.tolerance,
            "broad phase complete"
        );
        survivors
    }
}
