//! Numeric values games are built from and reduce to.

pub mod dyadic_rational_number;
pub mod nimber;
pub mod rational;
