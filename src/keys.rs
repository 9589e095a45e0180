//! Argument key spellings understood by sqlpkg
//!
//! Each group lists the long form first and the short form second. Keys
//! carry their delimiter so they compare directly against `CliArgument::key`.

pub const ACTION: &[&str] = &["/Action:", "/a:"];
pub const SOURCE_FILE: &[&str] = &["/SourceFile:", "/sf:"];
pub const TARGET_FILE: &[&str] = &["/TargetFile:", "/tf:"];
pub const DIAGNOSTICS_FILE: &[&str] = &["/DiagnosticsFile:", "/df:"];

pub const SOURCE_CONNECTION_STRING: &[&str] = &["/SourceConnectionString:", "/scs:"];
pub const SOURCE_SERVER_NAME: &[&str] = &["/SourceServerName:", "/ssn:"];
pub const SOURCE_DATABASE_NAME: &[&str] = &["/SourceDatabaseName:", "/sdn:"];
pub const SOURCE_USER: &[&str] = &["/SourceUser:", "/su:"];
pub const SOURCE_PASSWORD: &[&str] = &["/SourcePassword:", "/sp:"];
pub const SOURCE_TIMEOUT: &[&str] = &["/SourceTimeout:", "/st:"];
pub const SOURCE_TRUST_SERVER_CERTIFICATE: &[&str] = &["/SourceTrustServerCertificate:", "/stsc:"];

pub const TARGET_CONNECTION_STRING: &[&str] = &["/TargetConnectionString:", "/tcs:"];
pub const TARGET_SERVER_NAME: &[&str] = &["/TargetServerName:", "/tsn:"];
pub const TARGET_DATABASE_NAME: &[&str] = &["/TargetDatabaseName:", "/tdn:"];
pub const TARGET_USER: &[&str] = &["/TargetUser:", "/tu:"];
pub const TARGET_PASSWORD: &[&str] = &["/TargetPassword:", "/tp:"];
pub const TARGET_TIMEOUT: &[&str] = &["/TargetTimeout:", "/tt:"];
pub const TARGET_TRUST_SERVER_CERTIFICATE: &[&str] = &["/TargetTrustServerCertificate:", "/ttsc:"];

/// Shared by source and target; there is no role-specific spelling
pub const COMMAND_TIMEOUT: &[&str] = &["/p:CommandTimeout="];
pub const TABLE_DATA: &[&str] = &["/p:TableData="];
pub const EXCLUDE_TABLE_DATA: &[&str] = &["/p:ExcludeTableData="];
pub const VERIFY_EXTRACTION: &[&str] = &["/p:VerifyExtraction="];

/// Keys that are written in canonical form by the export assembler, or that
/// SqlPackage would reject next to a source connection string
pub const EXPORT_SKIPPED_ARGUMENTS: &[&str] = &[
    "/Action:",
    "/a:",
    "/SourceConnectionString:",
    "/scs:",
    "/SourceServerName:",
    "/ssn:",
    "/SourceDatabaseName:",
    "/sdn:",
    "/SourceUser:",
    "/su:",
    "/SourcePassword:",
    "/sp:",
    "/SourceTimeout:",
    "/st:",
    "/SourceTrustServerCertificate:",
    "/stsc:",
    "/SourceFile:",
    "/sf:",
    "/TargetFile:",
    "/tf:",
    "/DiagnosticsFile:",
    "/df:",
    "/TargetConnectionString:",
    "/tcs:",
    "/TargetServerName:",
    "/tsn:",
    "/TargetDatabaseName:",
    "/tdn:",
    "/TargetUser:",
    "/tu:",
    "/TargetPassword:",
    "/tp:",
    "/TargetTimeout:",
    "/tt:",
    "/TargetTrustServerCertificate:",
    "/ttsc:",
    "/p:ExcludeTableData=",
];

/// Keys that are written in canonical form by the import assembler, or that
/// only make sense for an export
pub const IMPORT_SKIPPED_ARGUMENTS: &[&str] = &[
    "/Action:",
    "/a:",
    "/TargetConnectionString:",
    "/tcs:",
    "/TargetServerName:",
    "/tsn:",
    "/TargetDatabaseName:",
    "/tdn:",
    "/TargetUser:",
    "/tu:",
    "/TargetPassword:",
    "/tp:",
    "/TargetTimeout:",
    "/tt:",
    "/TargetTrustServerCertificate:",
    "/ttsc:",
    "/TargetFile:",
    "/tf:",
    "/SourceFile:",
    "/sf:",
    "/DiagnosticsFile:",
    "/df:",
    "/SourceConnectionString:",
    "/scs:",
    "/SourceServerName:",
    "/ssn:",
    "/SourceDatabaseName:",
    "/sdn:",
    "/SourceUser:",
    "/su:",
    "/SourcePassword:",
    "/sp:",
    "/SourceTimeout:",
    "/st:",
    "/SourceTrustServerCertificate:",
    "/stsc:",
    "/p:ExcludeTableData=",
    "/p:TableData=",
    "/p:VerifyExtraction=",
];
