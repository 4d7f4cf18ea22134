//! Controladores HTTP

pub mod trip_controller;

pub use trip_controller::TripController;
