pub mod artifact;
pub mod config;
pub mod pages;
