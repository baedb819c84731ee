pub mod card;
pub mod color;
pub mod guild;

pub use card::{CardInput, CardShape, CardStyle};
pub use color::HexColor;
pub use guild::GuildSnapshot;
