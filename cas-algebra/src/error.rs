//! The kinds of errors that simplification operations can produce.
//!
//! Failing to match a rewrite rule is not an error; see
//! [`Transformed`](crate::symbolic::transform::Transformed).

use cas_attrs::ErrorKind;
use cas_error::ErrorKind;

/// An interrupt was requested while the computation was running.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the computation was interrupted",
    labels = ["while simplifying this expression"],
    help = "no partial result is available; start the computation again to retry",
)]
pub struct Interrupted;

/// An operation was applied to a tensor of a shape it does not support.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot compute `{}` of a tensor with rank {}", operation, rank),
    labels = ["this tensor"],
    help = format!("`{}` expects {}", operation, expected),
)]
pub struct UnsupportedShape {
    /// The operation that was attempted.
    pub operation: &'static str,

    /// The rank of the tensor the operation was applied to.
    pub rank: usize,

    /// A description of the shapes the operation supports.
    pub expected: &'static str,
}
