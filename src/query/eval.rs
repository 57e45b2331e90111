use std::cmp::Ordering;

use crate::document::{Document, Value};

use super::types::{CmpOp, FieldCond, FieldOp, Filter};

static NULL: Value = Value::Null;

/// Decides whether `doc` matches `filter`.
///
/// Total and side-effect free: type mismatches make a condition fail, they never raise.
/// `And` stops at the first failing clause and `Or` at the first match, so later clauses
/// are not evaluated.
#[must_use]
pub fn eval_filter(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::And(fs) => fs.iter().all(|f| eval_filter(doc, f)),
        Filter::Or(fs) => fs.iter().any(|f| eval_filter(doc, f)),
        Filter::Unknown(_) => true,
        Filter::Field { path, cond } => {
            let v = get_field(doc, path);
            match cond {
                FieldCond::Equals(literal) => v == literal,
                FieldCond::Ops(ops) => ops.iter().all(|op| eval_op(v, op)),
            }
        }
    }
}

fn eval_op(v: &Value, op: &FieldOp) -> bool {
    match op {
        FieldOp::Cmp(cmp, operand) => compare(v, *cmp, operand),
        FieldOp::In(set) => is_in_set(v, set),
        FieldOp::Nin(set) => !is_in_set(v, set),
        FieldOp::Unknown(_) => true,
    }
}

/// Applies a comparison operator with type-strict semantics.
#[must_use]
pub fn compare(v: &Value, op: CmpOp, operand: &Value) -> bool {
    match op {
        CmpOp::Eq => v == operand,
        CmpOp::Ne => v != operand,
        CmpOp::Gt => v.strict_cmp(operand) == Some(Ordering::Greater),
        CmpOp::Gte => matches!(v.strict_cmp(operand), Some(Ordering::Greater | Ordering::Equal)),
        CmpOp::Lt => v.strict_cmp(operand) == Some(Ordering::Less),
        CmpOp::Lte => matches!(v.strict_cmp(operand), Some(Ordering::Less | Ordering::Equal)),
    }
}

fn is_in_set(v: &Value, set: &Value) -> bool {
    set.as_array().is_some_and(|items| items.iter().any(|x| x == v))
}

/// Absent fields read as null.
fn get_field<'a>(doc: &'a Document, path: &str) -> &'a Value {
    doc.get(path).unwrap_or(&NULL)
}
