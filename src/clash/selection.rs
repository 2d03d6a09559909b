use std::sync::Mutex;

use crate::error::SelectionError;

use super::element::ElementId;

/// Receives the clashing elements, for example to highlight them in a viewer.
pub trait SelectionSink: Send + Sync {
    /// Replaces the current selection with `elements`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot accept the selection.
    fn select(&self, elements: &[ElementId]) -> Result<(), SelectionError>;
}

/// Sink that keeps every selection it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    selections: Mutex<Vec<Vec<ElementId>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selections received so far, oldest first.
    pub fn selections(&self) -> Vec<Vec<ElementId>> {
        self.selections
            .lock()
            .map(|selections| selections.clone())
            .unwrap_or_default()
    }
}

impl SelectionSink for RecordingSink {
    fn select(&self, elements: &[ElementId]) -> Result<(), SelectionError> {
        self.selections
            .lock()
            .map_err(|_| SelectionError::Unavailable)?
            .push(elements.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let sink = RecordingSink::new();
        sink.select(&[ElementId(2), ElementId(1)]).unwrap();
        sink.select(&[]).unwrap();
        assert_eq!(
            sink.selections(),
            vec![vec![ElementId(2), ElementId(1)], vec![]]
        );
    }
}
