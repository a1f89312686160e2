pub mod event_service;
pub mod generator;
pub mod playground;
pub mod render;
