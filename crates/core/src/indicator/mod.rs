pub mod keltner;
