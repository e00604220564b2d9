mod appointments;
mod doctors;
mod health_check;
mod login;
mod specialties;
mod users;

pub use appointments::*;
pub use doctors::*;
pub use health_check::*;
pub use login::*;
pub use specialties::*;
pub use users::*;
