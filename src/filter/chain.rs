use crate::{
    filter::{Error, Filter, FilterKind, stage},
    graph::EntityGraph,
};

/// An ordered list of stages, each applied to the output of the one before.
///
/// A kind of stage appears at most once.
#[derive(Debug, Default)]
pub struct FilterChain {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn then<F: Filter + 'static>(mut self, filter: F) -> Result<Self, Error> {
        let kind = filter.kind();
        if self.kinds().any(|existing| existing == kind) {
            return Err(Error::DuplicateStage(kind));
        }
        self.stages.push(Box::new(filter));
        Ok(self)
    }

    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.stages.iter().map(|stage| stage.kind())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Folds every stage over `source`. An empty chain hands `source` back
    /// unchanged.
    pub fn apply<G: EntityGraph + 'static>(&self, source: G) -> Box<dyn EntityGraph> {
        let source: Box<dyn EntityGraph> = Box::new(source);
        self.stages
            .iter()
            .fold(source, |graph, filter| -> Box<dyn EntityGraph> {
                Box::new(stage::build(filter.kind(), graph, |input| filter.derive(input)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BoundingBox, LocationFilter, ModeFilter, TimespanFilter};
    use crate::shared::ServiceDate;

    #[test]
    fn rejects_second_stage_of_same_kind() {
        let chain = FilterChain::new()
            .then(ModeFilter::new([3]).unwrap())
            .unwrap()
            .then(TimespanFilter::on_day(ServiceDate::from_ymd(2020, 1, 1).unwrap()))
            .unwrap();
        let err = chain.then(ModeFilter::new([0]).unwrap()).unwrap_err();
        assert_eq!(err, Error::DuplicateStage(FilterKind::Mode));
    }

    #[test]
    fn keeps_stage_order() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let chain = FilterChain::new()
            .then(LocationFilter::new(bounds))
            .unwrap()
            .then(ModeFilter::new([0]).unwrap())
            .unwrap();
        assert_eq!(
            chain.kinds().collect::<Vec<_>>(),
            vec![FilterKind::Location, FilterKind::Mode]
        );
        assert_eq!(chain.len(), 2);
    }
}
