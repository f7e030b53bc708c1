pub mod dialect;
pub mod pair;
pub mod token;
pub mod utterance;

pub use dialect::*;
pub use pair::*;
pub use token::*;
pub use utterance::*;
