pub mod common;

pub mod init_config;
pub mod update_config;
pub mod set_reserved_pool;

pub mod apply_balance_change;
pub mod record_transfer;

pub mod request_draw;
pub mod draw_callback;
pub mod mock_draw;

pub mod views;

pub use init_config::*;
pub use update_config::*;
pub use set_reserved_pool::*;
pub use apply_balance_change::*;
pub use record_transfer::*;
pub use request_draw::*;
pub use draw_callback::*;
pub use mock_draw::*;
pub use views::*;
