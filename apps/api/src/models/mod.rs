pub mod pack;
pub mod session;
