//! Command implementations

pub mod activate;
pub mod canvas;
pub mod compare;
pub mod course;
pub mod create;
pub mod delete;
pub mod dispatch;
pub mod eval;
pub mod export;
pub mod helpers;
pub mod import;
pub mod init;
pub mod list;
pub mod new_version;
pub mod publish;
pub mod show;
