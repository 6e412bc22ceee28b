mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod home;
pub use home::MarketView;

mod admin;
pub use admin::AdminView;
