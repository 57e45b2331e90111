//! Filter evaluation, update application and the scan-based executor.
mod cursor;
mod eval;
mod exec;
mod parse;
mod types;
mod update;

pub use cursor::{Cursor, SingleResult};
pub use eval::{compare, eval_filter};
pub use exec::{
    count_docs, delete_many, delete_one, drop, find_docs, find_one, insert_many, insert_one, update_many,
    update_one,
};
pub use parse::{parse_filter_json, parse_update_json};
pub use types::{
    CmpOp, DeleteReport, FieldCond, FieldOp, Filter, InsertManyResult, InsertOneResult, UpdateDoc, UpdateOp,
    UpdateReport,
};
pub use update::apply_update;
