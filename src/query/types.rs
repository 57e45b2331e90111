use serde::{Deserialize, Serialize};

use crate::document::{Document, Value};
use crate::types::DocumentId;

/// Ordering and equality operators usable on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// One operator in a field's operator mapping, e.g. `{"$gte": 26}`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Cmp(CmpOp, Value),
    /// Operand kept verbatim; anything but an array never matches.
    In(Value),
    Nin(Value),
    /// Unrecognised operator name; always holds.
    Unknown(String),
}

/// The condition attached to a plain field key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCond {
    /// `{"field": literal}`: deep equality, absent field compares as null.
    Equals(Value),
    /// `{"field": {"$op": operand, ...}}`: every operator must hold.
    Ops(Vec<FieldOp>),
}

/// A filter expression resolved into a typed tree.
///
/// A filter mapping parses to `And` over its keys, so `{}` is `And(vec![])` and matches
/// everything.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Field { path: String, cond: FieldCond },
    /// Unrecognised `$` key or malformed combinator; ignored during evaluation.
    Unknown(String),
}

impl Default for Filter {
    fn default() -> Self {
        Self::And(Vec::new())
    }
}

/// A single typed update step.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    Set { field: String, value: Value },
    Unset { field: String },
    Inc { field: String, by: Value },
    Push { field: String, value: Value },
}

impl UpdateOp {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Set { field, .. }
            | Self::Unset { field }
            | Self::Inc { field, .. }
            | Self::Push { field, .. } => field,
        }
    }
}

/// An update expression, classified once when parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateDoc {
    /// Operator steps in their declared order.
    Operations(Vec<UpdateOp>),
    /// Whole-document replacement; `_id` is never part of it.
    Replacement(Document),
}

impl Default for UpdateDoc {
    fn default() -> Self {
        Self::Operations(Vec::new())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOneResult {
    pub inserted_id: DocumentId,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertManyResult {
    pub inserted_ids: Vec<DocumentId>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    pub deleted: u64,
}
