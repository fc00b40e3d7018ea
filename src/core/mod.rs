//! Core library components.
//!
//! This module contains the reusable logic for key generation, private key
//! encryption, provider configuration and the secret providers themselves.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod keys;
pub mod notify;
pub mod provider;
