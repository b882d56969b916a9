// flux-common/src/dto/mod.rs

pub mod account;
pub mod balance;
pub mod currency;
pub mod decimal;
pub mod order;
pub mod ticker;
pub mod user;

pub use account::Account;
pub use balance::Balance;
pub use currency::{Currency, CurrencyPair, CurrencyPairParseError};
pub use order::{Order, OrderStatus, OrderType};
pub use ticker::Ticker;
pub use user::User;
