//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod journals;
pub mod languages;
pub mod move_lines;
pub mod moves;
pub mod partners;
pub mod sea_orm_active_enums;
