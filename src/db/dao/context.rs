use sea_orm::DatabaseConnection;

use super::{
    ActivityLogDao, AdminUserDao, CertificationDao, ContactMessageDao, DaoBase, JobPostingDao,
    NewsArticleDao, PageDao, ProjectDao, ReviewDao, SessionDao, SiteSettingDao, TeamMemberDao,
};

/// One handle per table, all sharing the same connection pool. Cheap to
/// clone; handlers take it out of application state.
#[derive(Clone)]
pub struct DaoContext {
    pub admin_users: AdminUserDao,
    pub sessions: SessionDao,
    pub activity_logs: ActivityLogDao,
    pub pages: PageDao,
    pub news: NewsArticleDao,
    pub projects: ProjectDao,
    pub team_members: TeamMemberDao,
    pub reviews: ReviewDao,
    pub certifications: CertificationDao,
    pub job_postings: JobPostingDao,
    pub site_settings: SiteSettingDao,
    pub contact_messages: ContactMessageDao,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            admin_users: AdminUserDao::new(db),
            sessions: SessionDao::new(db),
            activity_logs: ActivityLogDao::new(db),
            pages: PageDao::new(db),
            news: NewsArticleDao::new(db),
            projects: ProjectDao::new(db),
            team_members: TeamMemberDao::new(db),
            reviews: ReviewDao::new(db),
            certifications: CertificationDao::new(db),
            job_postings: JobPostingDao::new(db),
            site_settings: SiteSettingDao::new(db),
            contact_messages: ContactMessageDao::new(db),
        }
    }
}
