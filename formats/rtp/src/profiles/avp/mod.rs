pub mod payload_types;
