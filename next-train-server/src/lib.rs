//! Next-train server.
//!
//! A web service that answers: "Which station is closest to me, and when
//! do I have to leave to catch the next train on my line?"

pub mod arrivals;
pub mod cache;
pub mod config;
pub mod domain;
pub mod geo;
pub mod leave;
pub mod septa;
pub mod service;
pub mod stations;
pub mod web;
