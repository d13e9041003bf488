//! Request/response DTOs for the REST API.

pub mod analytics_dto;
pub mod common_dto;
pub mod dashboard_dto;
pub mod notification_dto;
pub mod property_dto;
pub mod settings_dto;

pub use analytics_dto::{
    AnalyticsQuery, ExportQuery, OverviewResponse, PerformanceResponse, PlatformBreakdown,
    PlatformPerformance, TrendsResponse, WeeklyTrend,
};
pub use common_dto::{MessageResponse, PaginationParams};
pub use dashboard_dto::{ActivitiesResponse, ControlResponse};
pub use notification_dto::{
    KindCounts, NotificationListResponse, NotificationQuery, NotificationStatsResponse,
};
pub use property_dto::{CitiesResponse, PropertyListResponse, PropertyQuery, ToggleResponse};
pub use settings_dto::{
    ApiKeysResponse, ApiKeysUpdateResponse, SystemInfoResponse, TestConnectionRequest,
    TestConnectionResponse,
};
