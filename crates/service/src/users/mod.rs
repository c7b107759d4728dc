//! Users module: three-layer split (domain, repository contract, backends).

pub mod domain;
pub mod errors;
pub mod factory;
pub mod repository;
pub mod repo;
