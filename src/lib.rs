//! Cost estimation engine for asphalt paving projects
//!
//! This crate prices a paving job from a single project document: material
//! quantities, excavation and disposal, crew labor with penalty rates,
//! equipment depreciation, consumables and traffic management, then turns
//! the total cost into a quote with margin, discount and GST.
//!
//! The engine is pure and deterministic; [`calculation::estimate`] is the
//! library entry point and [`api::create_router`] exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
