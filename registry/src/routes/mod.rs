pub mod api;
pub mod gems;
