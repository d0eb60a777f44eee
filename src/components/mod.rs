mod connect_button;
mod flip_card;
mod mint_button;

pub use connect_button::ConnectButton;
pub use flip_card::{BackCard, FlipCard, FrontCard};
pub use mint_button::MintButton;
