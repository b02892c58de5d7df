//! End to end tests for the retype workspace, grouped by pipeline stage.


#[cfg(test)]
mod ast;
