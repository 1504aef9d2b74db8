pub mod store;
pub mod view;
