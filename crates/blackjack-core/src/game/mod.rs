pub mod outcome;
pub mod round;
pub mod session;
