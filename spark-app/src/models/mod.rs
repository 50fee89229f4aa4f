mod account;
pub mod input;

pub use account::AccountUser;
