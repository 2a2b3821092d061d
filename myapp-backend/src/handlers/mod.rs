pub mod check_name;
pub mod compare;
pub mod error;
pub mod sqrt;
