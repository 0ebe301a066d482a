pub mod columns;
pub mod lines;
