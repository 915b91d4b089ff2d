pub mod console;
pub mod test;
