mod widget;

pub use widget::{DashPanel, TOGGLE_DASH_ACTION};
