use crate::FamilyGraph;

/// A layout engine that turns a set of person records into a positioned graph
///
/// This trait is generic over the input type `R` so engines can accept
/// whatever shape of record collection suits them.
pub trait LayoutEngine<R> {
    /// The error type returned when the layout can't be computed
    type Error;

    /// Compute the positioned graph for the given records
    ///
    /// # Errors
    /// Returns an error if the engine is misconfigured. Malformed records
    /// (dangling or one-sided references) are not errors.
    fn layout(&self, records: R) -> Result<FamilyGraph, Self::Error>;
}
