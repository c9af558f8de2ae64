//! Employee Directory - multi-tenant employee search behind a per-client
//! fixed-window rate limiter.
//!
//! Layout follows ports and adapters: `domain` holds the pure rules
//! (normalization, predicates, projection), `ports` the async traits for the
//! counter and record stores, `application` the search handler, and
//! `adapters` the Postgres, Redis, in-memory and axum implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
