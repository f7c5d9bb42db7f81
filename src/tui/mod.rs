pub mod app;
pub mod input;
pub mod model;
pub mod terminal;
pub mod ui;
