//! Pure aiming math: coordinate mapping and re-aim thresholding.

pub mod mapper;
pub mod tracker;
