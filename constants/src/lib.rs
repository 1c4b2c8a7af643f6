pub mod ply;
pub mod sampling;
