pub mod cors;
pub mod extract;
pub mod health_check;
pub mod url;
