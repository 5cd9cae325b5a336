pub mod gradient;
pub mod rgb;
