pub mod algorithms;
pub mod bot;
pub mod config;
pub mod error;
pub mod grid;
pub mod level;
pub mod location;
pub mod map;
pub mod navigator;
pub mod path_cache;
pub mod simulation;
pub mod statistics;
pub mod turn;
pub mod view;
pub mod weights;

pub use bot::{BehaviourSet, PlayerBot};
pub use error::{NavigatorError, Result};
pub use location::{Location, Offset};
pub use navigator::Navigator;
pub use turn::Turn;
