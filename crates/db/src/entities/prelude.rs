//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::journals::Entity as Journals;
pub use super::languages::Entity as Languages;
pub use super::move_lines::Entity as MoveLines;
pub use super::moves::Entity as Moves;
pub use super::partners::Entity as Partners;
