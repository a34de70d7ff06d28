pub mod board;
pub mod codec;
pub mod game;
pub mod history;
pub mod lifecycle;
pub mod player;
pub mod rules;
