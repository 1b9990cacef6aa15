// Application layer - use cases and renderer seams
pub mod chart_service;
pub mod export_service;
pub mod renderer;
