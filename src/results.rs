//! Leaf results and the append-only list they accumulate in.

use crate::compare::DiffReport;
use crate::enums::Classification;
use crate::error::{InternalError, InternalErrorKind};
use crate::types::Expr;
use serde_json::Value;
use std::ops::Range;

/// Failure payload of a leaf, rendered lazily.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// A boolean predicate: its source and what it evaluated to.
    Standard {
        expr: Expr,
        value: Value,
        classification: Classification,
    },
    /// A structural match: the comparator's report.
    Structural { report: DiffReport },
}

/// Outcome of evaluating one leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafResult {
    pub success: bool,
    pub payload: Payload,
}

/// Ordered, append-only record of leaf results from one evaluation pass.
///
/// Failures recorded inside an OR that later succeeded are marked as
/// superseded; they stay in the list but are skipped by
/// [`live_failures`](Self::live_failures).
#[derive(Clone, Debug)]
pub struct ResultList {
    items: Vec<LeafResult>,
    superseded: Vec<Range<usize>>,
    limit: usize,
}

impl ResultList {
    pub fn new(limit: usize) -> Self {
        ResultList {
            items: Vec::new(),
            superseded: Vec::new(),
            limit,
        }
    }

    pub fn append(&mut self, result: LeafResult) -> Result<(), InternalError> {
        if self.items.len() >= self.limit {
            return Err(InternalError::new(
                InternalErrorKind::ResultLimit,
                format!("more than {} results recorded", self.limit),
            ));
        }
        self.items.push(result);
        Ok(())
    }

    pub fn last(&self) -> Option<&LeafResult> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_failures(&self) -> usize {
        self.iter_failures().count()
    }

    /// Every failure in encounter order, superseded or not.
    pub fn iter_failures(&self) -> impl Iterator<Item = &LeafResult> + '_ {
        self.items.iter().filter(|r| !r.success)
    }

    /// Mark every result from `start` up to the current end as superseded by
    /// a later success.
    pub fn supersede_from(&mut self, start: usize) {
        let end = self.items.len();
        if start < end {
            self.superseded.push(start..end);
        }
    }

    /// Failures that still bear on the final outcome, in encounter order.
    pub fn live_failures(&self) -> impl Iterator<Item = &LeafResult> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, r)| !r.success && !self.superseded.iter().any(|s| s.contains(i)))
            .map(|(_, r)| r)
    }

    /// Whether the evaluation this list records passed.
    pub fn passed(&self) -> bool {
        self.last().is_none_or(|r| r.success)
    }
}
