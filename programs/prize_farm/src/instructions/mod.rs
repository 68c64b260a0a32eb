pub mod admin;
pub mod deposit;
pub mod harvest;
pub mod manager;
pub mod prize_pool;
pub mod update_pools;
pub mod views;
pub mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use harvest::*;
pub use manager::*;
pub use prize_pool::*;
pub use update_pools::*;
pub use views::*;
pub use withdraw::*;
