//! Core functionalities.
mod agent;
mod encoder;
mod env;
mod policy;
mod step;
pub use agent::Agent;
pub use encoder::StateEncoder;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation emitted by an environment, typically a raw frame.
pub trait Obs: Clone + Debug {}

/// An action of the environment.
pub trait Act: Clone + Debug {
    /// Returns the action that leaves the environment to its own dynamics.
    ///
    /// It is applied once right after a reset, so that two observations are
    /// available before the first state is encoded.
    fn noop() -> Self;
}
