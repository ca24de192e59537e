//! Declarative validation-expression evaluator.
//!
//! A validation tree combines boolean predicates (`check`) and structural
//! matches (`alike`) with short-circuiting `and`/`or`. Evaluating it against a
//! value yields either a pass or a list of human-readable diagnostics:
//!
//! ```text
//! raw → ExpressionParser → Node → Evaluator → ResultList → render → Outcome
//! ```
//!
//! Expression execution and structural comparison are supplied by the caller
//! through [`execute::ExpressionExecutor`] and
//! [`compare::StructuralComparator`].
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "cel-eval")] {
//! use serde_json::{Value, json};
//! use vetting::compare::{Comparison, DiffReport, StructuralComparator};
//! use vetting::execute::DefaultCelExecutor;
//! use vetting::parse::TreeParser;
//! use vetting::{AlikeSettings, Evaluator, Subject};
//!
//! struct SameKind;
//!
//! impl StructuralComparator for SameKind {
//!     fn compare(&self, t: &Value, a: &Value, _: &str, _: &AlikeSettings) -> Comparison {
//!         if std::mem::discriminant(t) == std::mem::discriminant(a) {
//!             Comparison::matched()
//!         } else {
//!             Comparison::mismatched(DiffReport::new(json!("kind differs")))
//!         }
//!     }
//!
//!     fn format(&self, report: &DiffReport, _: &AlikeSettings) -> Vec<String> {
//!         vec![report.as_value().to_string()]
//!     }
//! }
//!
//! let evaluator = Evaluator::new(&TreeParser, &DefaultCelExecutor, &SameKind);
//! let outcome = evaluator
//!     .evaluate("check: \"x > 0\"", &Subject::new("x", json!(-3)), &json!({}))
//!     .expect("evaluation runs");
//! assert_eq!(outcome.diagnostics, vec!["`x > 0` is not TRUE (FALSE)"]);
//! # }
//! ```
//!
//! # Feature Flags
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `cel-eval` | yes     | CEL expression execution via the [`cel`] crate. Enables [`execute::DefaultCelExecutor`]. |

pub mod classify;
pub mod compare;
pub mod config;
pub mod enums;
pub mod error;
pub mod evaluate;
pub mod execute;
pub mod parse;
pub mod render;
pub mod results;
pub mod serialize;
pub mod types;

pub use config::{AlikeSettings, Settings};
pub use error::*;
pub use evaluate::Evaluator;
pub use types::*;

pub use parse::parse;
pub use serialize::serialize;

/// Convenience entry point: evaluate and fold any diagnostics into a single
/// [`VetError::Invalid`] naming the subject.
///
/// # Errors
///
/// Everything [`Evaluator::evaluate`] returns, plus [`VetError::Invalid`]
/// when the value fails validation.
pub fn vet(
    evaluator: &Evaluator<'_>,
    raw: &str,
    subject: &Subject,
    context: &serde_json::Value,
) -> Result<(), VetError> {
    evaluator
        .evaluate(raw, subject, context)?
        .into_result(&subject.name)
        .map_err(VetError::Invalid)
}
