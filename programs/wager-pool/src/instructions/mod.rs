pub mod cancel_lottery;
pub mod commit_randomness;
pub mod enter;
pub mod initialize_lottery;
pub mod pick_winner;
pub mod pick_winner_with_oracle;
pub mod views;

pub use cancel_lottery::*;
pub use commit_randomness::*;
pub use enter::*;
pub use initialize_lottery::*;
pub use pick_winner::*;
pub use pick_winner_with_oracle::*;
pub use views::*;
