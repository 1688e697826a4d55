pub mod activity_log_dao;
pub mod admin_user_dao;
pub mod base;
pub mod base_traits;
pub mod content_dao;
pub mod context;
pub mod error;
pub mod session_dao;

pub use activity_log_dao::{ActivityLogDao, AuthAction};
pub use admin_user_dao::AdminUserDao;
pub use base::{DaoBase, PaginatedResponse};
pub use content_dao::{
    CertificationDao, ContactMessageDao, JobPostingDao, NewsArticleDao, PageDao, ProjectDao,
    ReviewDao, SiteSettingDao, TeamMemberDao,
};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use session_dao::SessionDao;
