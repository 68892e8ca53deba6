mod book;
mod common;
mod loan;
mod user;

pub use self::{book::*, common::*, loan::*, user::*};
