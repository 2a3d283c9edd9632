use thiserror::Error;

/// Errors raised while wiring containers together.
///
/// Emissions themselves are infallible; only graph construction can be
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LiveDataError {
  /// A mediator was asked to observe itself, which would feed every emission
  /// straight back into the same container.
  #[error("a mediator cannot be registered as its own source")]
  SelfSource,
}
