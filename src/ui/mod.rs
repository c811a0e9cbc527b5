pub mod input;
pub mod panels;
pub mod plot;
pub mod slices;
