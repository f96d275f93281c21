pub mod capture;
pub mod detection;
pub mod hud;
pub mod pipeline;
pub mod prediction;
pub mod sampling;
pub mod shared;
