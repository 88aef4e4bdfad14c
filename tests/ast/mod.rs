pub mod tests_location;
