pub mod color;
pub mod config;
pub mod rota;
pub mod time;
