/// Database models
///
/// One module per entity, each pairing the row struct with its query
/// functions. Every employee/team query takes the caller's organisation id
/// and folds it into the WHERE clause; a row belonging to another
/// organisation is indistinguishable from a missing one.
///
/// # Models
///
/// - `organisation`: Tenant root, created once at registration
/// - `user`: Login principals (globally unique email)
/// - `employee`: Managed HR records, tenant-scoped
/// - `team`: Tenant-scoped teams plus the employee/team join table
/// - `log`: Append-only audit trail
pub mod employee;
pub mod log;
pub mod organisation;
pub mod team;
pub mod user;
