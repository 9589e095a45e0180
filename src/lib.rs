//! sqlpkg library crate
//!
//! sqlpkg sits in front of Microsoft's SqlPackage tool. It accepts SqlPackage
//! style arguments plus a few conveniences, and turns them into the argument
//! list SqlPackage actually needs:
//!
//! - Connection strings and discrete server/database/user fields are merged
//!   into one canonical connection string per side
//! - Export and import argument lists are assembled with their mandatory
//!   leading arguments in a fixed order
//! - `/p:ExcludeTableData=` (with `*` wildcards) is resolved against the live
//!   table list of the source database into explicit `/p:TableData=` entries
//!
//! Running SqlPackage itself is left to the `runner` module.

pub mod argument;
pub mod assembler;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod invocation;
pub mod keys;
pub mod lookup;
pub mod pipeline;
pub mod runner;
pub mod table_filter;
