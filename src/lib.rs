pub mod app;
pub mod composite;
pub mod export;
pub mod history;
pub mod logging;
pub mod model;
pub mod raster;
pub mod session;
pub mod settings;
pub mod stamp;
pub mod surface;
