pub mod admin;
pub mod choose_winner;
pub mod deposit;
pub mod enter_lottery;
pub mod request_randomness;
pub mod reserve_accounts;
pub mod settle_randomness;
pub mod withdraw;
pub mod withdraw_user_tokens;

pub use admin::*;
pub use choose_winner::*;
pub use deposit::*;
pub use enter_lottery::*;
pub use request_randomness::*;
pub use reserve_accounts::*;
pub use settle_randomness::*;
pub use withdraw::*;
pub use withdraw_user_tokens::*;
