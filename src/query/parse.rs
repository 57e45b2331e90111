use crate::document::{Document, Value};
use crate::errors::DbError;
use crate::types::{DocumentId, ID_FIELD, is_operator_key};

use super::types::{CmpOp, FieldCond, FieldOp, Filter, UpdateDoc, UpdateOp};

impl Filter {
    /// Resolves a filter mapping into a typed tree.
    ///
    /// Parsing never fails: unrecognised `$` keys, and `$and`/`$or` whose operand is not a
    /// sequence of mappings, become [`Filter::Unknown`] and are skipped when evaluated.
    #[must_use]
    pub fn parse(filter: &Document) -> Self {
        Self::And(filter.iter().map(|(k, v)| parse_clause(k, v)).collect())
    }

    /// `Some(id)` when the filter is exactly `{"_id": "<string>"}`.
    #[must_use]
    pub fn as_id_lookup(&self) -> Option<&str> {
        let Self::And(clauses) = self else { return None };
        match clauses.as_slice() {
            [Self::Field { path, cond: FieldCond::Equals(Value::String(id)) }] if path == ID_FIELD => {
                Some(id.as_str())
            }
            _ => None,
        }
    }

    /// The `{"_id": id}` filter, which takes the key-lookup path.
    #[must_use]
    pub fn by_id(id: &DocumentId) -> Self {
        Self::And(vec![Self::Field {
            path: ID_FIELD.to_owned(),
            cond: FieldCond::Equals(Value::String(id.0.clone())),
        }])
    }

    /// True for a filter with no clauses, which matches every document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::And(c) if c.is_empty())
    }

    /// Short label for log lines.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::And(_) => "$and",
            Self::Or(_) => "$or",
            Self::Field { cond: FieldCond::Equals(_), .. } => "eq",
            Self::Field { cond: FieldCond::Ops(_), .. } => "ops",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<&Document> for Filter {
    fn from(d: &Document) -> Self {
        Self::parse(d)
    }
}

impl From<Document> for Filter {
    fn from(d: Document) -> Self {
        Self::parse(&d)
    }
}

fn parse_clause(key: &str, value: &Value) -> Filter {
    match key {
        "$and" => parse_filter_list(value).map_or_else(|| Filter::Unknown(key.to_owned()), Filter::And),
        "$or" => parse_filter_list(value).map_or_else(|| Filter::Unknown(key.to_owned()), Filter::Or),
        k if is_operator_key(k) => Filter::Unknown(k.to_owned()),
        field => Filter::Field { path: field.to_owned(), cond: parse_field_cond(value) },
    }
}

fn parse_filter_list(value: &Value) -> Option<Vec<Filter>> {
    value.as_array()?.iter().map(|v| v.as_document().map(Filter::parse)).collect()
}

/// A mapping counts as an operator mapping only when it is non-empty and every key carries
/// the sigil; anything else is a literal compared by deep equality.
fn parse_field_cond(value: &Value) -> FieldCond {
    match value {
        Value::Object(ops) if !ops.is_empty() && ops.keys().all(|k| is_operator_key(k)) => {
            FieldCond::Ops(ops.iter().map(|(op, operand)| parse_field_op(op, operand)).collect())
        }
        literal => FieldCond::Equals(literal.clone()),
    }
}

fn parse_field_op(op: &str, operand: &Value) -> FieldOp {
    let cmp = match op {
        "$eq" => CmpOp::Eq,
        "$ne" => CmpOp::Ne,
        "$gt" => CmpOp::Gt,
        "$gte" => CmpOp::Gte,
        "$lt" => CmpOp::Lt,
        "$lte" => CmpOp::Lte,
        "$in" => return FieldOp::In(operand.clone()),
        "$nin" => return FieldOp::Nin(operand.clone()),
        other => return FieldOp::Unknown(other.to_owned()),
    };
    FieldOp::Cmp(cmp, operand.clone())
}

impl UpdateDoc {
    /// Classifies an update mapping.
    ///
    /// One key without the sigil turns the whole expression into a replacement made of the
    /// non-operator keys. Otherwise each known operator's field mapping is flattened into
    /// steps in declared order; unknown operators, non-mapping operands and `_id` targets
    /// are dropped.
    #[must_use]
    pub fn parse(update: &Document) -> Self {
        if update.keys().any(|k| !is_operator_key(k)) {
            let replacement = update
                .iter()
                .filter(|(k, _)| !is_operator_key(k) && k.as_str() != ID_FIELD)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            return Self::Replacement(replacement);
        }
        let mut ops = Vec::new();
        for (op, operand) in update {
            match (op.as_str(), operand) {
                ("$set", Value::Object(fields)) => ops.extend(
                    targets(fields).map(|(f, v)| UpdateOp::Set { field: f.clone(), value: v.clone() }),
                ),
                ("$unset", Value::Object(fields)) => {
                    ops.extend(targets(fields).map(|(f, _)| UpdateOp::Unset { field: f.clone() }));
                }
                // Also accept the list form: {"$unset": ["a", "b"]}
                ("$unset", Value::Array(names)) => ops.extend(
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|f| *f != ID_FIELD)
                        .map(|f| UpdateOp::Unset { field: f.to_owned() }),
                ),
                ("$inc", Value::Object(fields)) => ops.extend(
                    targets(fields)
                        .filter(|(_, v)| v.is_number())
                        .map(|(f, v)| UpdateOp::Inc { field: f.clone(), by: v.clone() }),
                ),
                ("$push", Value::Object(fields)) => ops.extend(
                    targets(fields).map(|(f, v)| UpdateOp::Push { field: f.clone(), value: v.clone() }),
                ),
                (other, _) => log::debug!("ignoring update operator {other} ({})", operand.kind()),
            }
        }
        Self::Operations(ops)
    }

    #[must_use]
    pub const fn is_replacement(&self) -> bool {
        matches!(self, Self::Replacement(_))
    }
}

impl From<&Document> for UpdateDoc {
    fn from(d: &Document) -> Self {
        Self::parse(d)
    }
}

impl From<Document> for UpdateDoc {
    fn from(d: Document) -> Self {
        Self::parse(&d)
    }
}

fn targets(fields: &Document) -> impl Iterator<Item = (&String, &Value)> {
    fields.iter().filter(|(f, _)| f.as_str() != ID_FIELD)
}

/// # Errors
/// Returns an encoding error if the JSON text is invalid or not an object.
pub fn parse_filter_json(json: &str) -> Result<Filter, DbError> {
    Ok(Filter::parse(&Document::from_json_str(json)?))
}

/// # Errors
/// Returns an encoding error if the JSON text is invalid or not an object.
pub fn parse_update_json(json: &str) -> Result<UpdateDoc, DbError> {
    Ok(UpdateDoc::parse(&Document::from_json_str(json)?))
}
