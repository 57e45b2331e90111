use crate::document::{Document, Value};
use crate::types::ID_FIELD;

use super::types::{UpdateDoc, UpdateOp};

/// Produces the new state of `doc` under `upd`; `doc` itself is left untouched.
///
/// The original `_id` always survives: a replacement is rebuilt around it, and operator
/// steps never target it.
#[must_use]
pub fn apply_update(doc: &Document, upd: &UpdateDoc) -> Document {
    match upd {
        UpdateDoc::Replacement(fields) => {
            let mut out = Document::new();
            if let Some(id) = doc.get(ID_FIELD) {
                out.insert(ID_FIELD, id.clone());
            }
            for (k, v) in fields {
                if k != ID_FIELD {
                    out.insert(k.clone(), v.clone());
                }
            }
            out
        }
        UpdateDoc::Operations(ops) => {
            let mut out = doc.clone();
            for op in ops.iter().filter(|op| op.field() != ID_FIELD) {
                apply_op(&mut out, op);
            }
            out
        }
    }
}

fn apply_op(doc: &mut Document, op: &UpdateOp) {
    match op {
        UpdateOp::Set { field, value } => {
            doc.insert(field.clone(), value.clone());
        }
        UpdateOp::Unset { field } => {
            doc.remove(field);
        }
        UpdateOp::Inc { field, by } => {
            // absent or non-numeric counts as "start from the increment"
            let next = doc
                .get(field)
                .and_then(|cur| cur.checked_numeric_add(by))
                .unwrap_or_else(|| by.clone());
            doc.insert(field.clone(), next);
        }
        UpdateOp::Push { field, value } => match doc.get_mut(field) {
            Some(Value::Array(items)) => items.push(value.clone()),
            _ => {
                doc.insert(field.clone(), Value::Array(vec![value.clone()]));
            }
        },
    }
}
