//! countymap - Find the counties around a point and keep their labels placed

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layers;
pub mod osm;
