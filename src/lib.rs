pub mod handlers;
pub mod models;
pub mod routes;
pub mod screens;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
