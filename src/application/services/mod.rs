//! Application services - Use case implementations
//!
//! Each service accepts its port dependencies explicitly so that the SQLite
//! adapters can be swapped for in-memory ones.

pub mod admin_config_service;
pub mod admin_dashboard_service;
pub mod page_composer;
pub mod room_join;
pub mod session_gate;

pub use admin_config_service::{AdminConfigError, AdminConfigService};
pub use admin_dashboard_service::{AdminDashboardService, PageDataPayload};
pub use page_composer::{AdminPage, ToastQueue};
pub use room_join::{JoinState, RoomJoinCoordinator, ADMIN_ROOM};
pub use session_gate::{check_admin, GateDecision, Redirect};
