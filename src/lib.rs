//! MovieShelf Library
//!
//! Catalog of owned physical media (Blu-Ray, DVD, LaserDisc, wishlist)
//! with fuzzy title search and barcode lookup.

pub mod barcode;
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod search;
