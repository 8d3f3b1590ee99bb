pub mod fqconv;
