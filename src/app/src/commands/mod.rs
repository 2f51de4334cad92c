pub mod delay;
pub mod navigate;
