pub mod tests_parser;
