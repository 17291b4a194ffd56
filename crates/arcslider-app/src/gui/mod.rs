pub mod app;
pub mod painter;
pub mod scheduler;
pub mod theme;
