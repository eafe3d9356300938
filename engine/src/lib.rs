pub mod types;
pub mod state;
pub mod error;
pub mod gateway;
pub mod prompts;
pub mod setup;
pub mod phases;
pub mod game;
pub mod analytics;


pub use types::*;
pub use state::GameState;
pub use error::GameError;
pub use gateway::{Connector, ConnectorError, Gateway, GatewayError};
pub use game::Game;
