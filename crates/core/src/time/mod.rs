pub mod relative;

pub use relative::relative_label;
