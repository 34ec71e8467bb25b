//! Domain definitions.

pub mod draft;
pub mod residence;

pub use self::{
    draft::{Draft, EditMode},
    residence::Residence,
};
