pub mod backend;
pub mod cpu;
pub mod labels;
pub mod pipeline;
