pub mod live;
pub mod still;
