pub mod read_only;
