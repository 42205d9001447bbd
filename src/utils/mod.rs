//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::cross_cov::cross_cov;

mod center;
mod cross_cov;
