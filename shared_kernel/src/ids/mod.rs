pub mod string_ids;
