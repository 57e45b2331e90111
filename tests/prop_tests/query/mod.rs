mod prop_cursor;
mod prop_update;
