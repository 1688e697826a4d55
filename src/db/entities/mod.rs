#[allow(unused_imports)]
pub mod prelude {
    pub use super::activity_log::Entity as ActivityLog;
    pub use super::admin_user::Entity as AdminUser;
    pub use super::certification::Entity as Certification;
    pub use super::contact_message::Entity as ContactMessage;
    pub use super::job_posting::Entity as JobPosting;
    pub use super::news_article::Entity as NewsArticle;
    pub use super::page::Entity as Page;
    pub use super::project::Entity as Project;
    pub use super::review::Entity as Review;
    pub use super::session::Entity as Session;
    pub use super::site_setting::Entity as SiteSetting;
    pub use super::team_member::Entity as TeamMember;
}

pub mod activity_log;
pub mod admin_user;
pub mod certification;
pub mod contact_message;
pub mod job_posting;
pub mod news_article;
pub mod page;
pub mod project;
pub mod review;
pub mod session;
pub mod site_setting;
pub mod team_member;
