mod appointment;
mod catalog;
mod cpf;
mod error;
mod person;
mod user;

pub use appointment::*;
pub use catalog::*;
pub use cpf::Cpf;
pub use error::*;
pub use person::*;
pub use user::*;
