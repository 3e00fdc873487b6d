/// BT.601 sample conversion.
pub mod color;
