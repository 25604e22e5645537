pub mod contributions;
pub mod health;
pub mod status;
