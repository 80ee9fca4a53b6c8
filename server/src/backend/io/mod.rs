//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services: REST
//! handlers, DTO mappers and the translation of domain errors into status
//! codes.

pub mod rest;
