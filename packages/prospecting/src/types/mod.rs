//! Data types for lead qualification and contact discovery.

pub mod config;
pub mod contact;
pub mod discovery;
pub mod icp;
pub mod integration;
pub mod score;
