// Pack lifecycle: validate → estimate → generate → persist; read; cascade delete.

pub mod handlers;
pub mod service;
pub mod validation;
