//! Services: the convergence core.

pub mod converge;
pub mod diff;
pub mod home_policy;
pub mod options;
pub mod password;

pub use converge::ConvergenceController;
pub use home_policy::HomePolicy;
pub use options::Dialect;
pub use password::{FoldIntoModify, SolarisPasswordStrategy};
