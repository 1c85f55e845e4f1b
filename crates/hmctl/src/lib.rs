pub mod cmd_centres;
pub mod cmd_chunks;
pub mod cmd_get;
pub mod cmd_schema;
pub mod cmd_set;
pub mod cmd_show;
pub mod cmd_unset;
pub mod cmd_validate;
pub mod common;
