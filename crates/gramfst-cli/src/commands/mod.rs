pub mod check;
pub mod compile;
pub mod dump;
pub mod grammar_loader;
pub mod run_common;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod grammar_loader_tests;
