//! Grantboard persistence services, local storage and seed data.

pub mod context;
pub mod database;
pub mod domain;
pub mod local;
pub mod seed;

#[cfg(test)]
mod test;
