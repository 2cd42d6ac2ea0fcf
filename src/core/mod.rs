//! Core types describing simulated bodies, obstacles, and the vectors they use.

pub mod vector;
pub mod body;
pub mod obstacle;

pub use vector::Vector;
pub use body::Body;
pub use obstacle::Obstacle;
