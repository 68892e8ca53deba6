pub use self::{book::BookRouter, loan::LoanRouter, user::UserRouter};

mod book;
mod loan;
mod user;
