#[allow(clippy::needless_update)]
mod course;
#[allow(clippy::needless_update)]
mod extra_field;
pub mod prelude;
#[allow(clippy::needless_update)]
mod setting;
#[allow(clippy::needless_update)]
mod tool;
