pub mod check;
pub mod def_loader;
pub mod dump;
pub mod emit;
pub mod scan;
pub mod trace;

#[cfg(test)]
mod dump_tests;
