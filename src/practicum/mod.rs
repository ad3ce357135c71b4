pub mod client;

pub use client::{PracticumClient, StatusSource};
