//! Error taxonomy for the evaluator.  Both variants are validation
//! failures raised before any orbit state is allocated; once the
//! inputs are accepted the computation itself cannot fail.

/// The reasons an evaluation request can be rejected.
#[derive(Debug, Fail, PartialEq)]
pub enum EvalError {
    /// The region's bounds are inverted, degenerate, or not numbers.
    #[fail(display = "invalid region: {}", _0)]
    InvalidRegion(String),

    /// A density, iteration cap, or thread count that must be
    /// positive is not.
    #[fail(display = "invalid parameter: {}", _0)]
    InvalidParameter(String),
}
