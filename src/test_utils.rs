use crate::auth::CurrentUser;
use crate::database::audit_log::AuditLogRepository;
use crate::database::contact::ContactRepository;
use crate::database::password_reset::PasswordResetRepository;
use crate::database::project::ProjectRepository;
use crate::database::security_log::SecurityLogRepository;
use crate::database::session::SessionRepository;
use crate::database::technology::TechnologyRepository;
use crate::database::testimonial::TestimonialRepository;
use crate::database::timeline::TimelineRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::audit_log::{AuditLogEntry, NewAuditLogEntry};
use crate::models::contact::{ContactMessage, ContactRequest};
use crate::models::password_reset::PasswordReset;
use crate::models::project::{Project, ProjectMetrics, ProjectRequest};
use crate::models::security_event::{NewSecurityEvent, SecurityEvent, UNKNOWN_EMAIL, UNKNOWN_HEADER};
use crate::models::session::Session;
use crate::models::technology::{Technology, TechnologyRequest};
use crate::models::testimonial::{Testimonial, TestimonialRequest};
use crate::models::timeline::{TimelineEntry, TimelineEntryRequest, TimelineKind};
use crate::models::user::User;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "owner@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-9";

pub fn security_event_at(event_type: &str, ip_address: &str, created_at: DateTime<Utc>) -> SecurityEvent {
    SecurityEvent {
        id: Uuid::new_v4(),
        event_type: event_type.to_string(),
        email: UNKNOWN_EMAIL.to_string(),
        ip_address: ip_address.to_string(),
        device_type: "Desktop".to_string(),
        user_agent: UNKNOWN_HEADER.to_string(),
        details: json!({}),
        created_at,
    }
}

pub fn request_context(ip_address: &str, user_agent: &str) -> RequestContext {
    RequestContext {
        ip_address: ip_address.to_string(),
        user_agent: user_agent.to_string(),
    }
}

pub fn admin_user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        email: ADMIN_EMAIL.to_string(),
    }
}

pub fn sample_project(title: &str) -> ProjectRequest {
    ProjectRequest {
        title: title.to_string(),
        description: format!("{} description", title),
        content: String::new(),
        tech_stack: vec!["rust".to_string()],
        repo_url: None,
        live_url: None,
        image_url: None,
        is_featured: false,
    }
}

pub fn sample_testimonial() -> TestimonialRequest {
    TestimonialRequest {
        author_name: "Ada".to_string(),
        author_role: Some("CTO".to_string()),
        company: Some("Analytical Engines".to_string()),
        email: Some("ada@example.com".to_string()),
        content: "Shipped the dashboard ahead of schedule.".to_string(),
        rating: 5,
    }
}

pub fn sample_contact(website: Option<&str>) -> ContactRequest {
    ContactRequest {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        subject: Some("Hello".to_string()),
        message: "Are you available for a project?".to_string(),
        website: website.map(str::to_string),
    }
}

#[derive(Default)]
struct MockState {
    security_events: Vec<SecurityEvent>,
    audit_entries: Vec<AuditLogEntry>,
    /// Users with their plaintext password.
    users: Vec<(User, String)>,
    sessions: Vec<Session>,
    /// Resets with their token hash.
    resets: Vec<(PasswordReset, String)>,
    projects: Vec<Project>,
    testimonials: Vec<Testimonial>,
    contact_messages: Vec<ContactMessage>,
    technologies: Vec<Technology>,
    timeline: Vec<(TimelineKind, TimelineEntry)>,
}

/// In-memory store behind every repository trait.
///
/// `failing()` makes every call error; `failing_logs()` only breaks the
/// `security_logs` and `audit_logs` stores.
#[derive(Default)]
pub struct MockRepository {
    state: Mutex<MockState>,
    fail_all: bool,
    fail_logs: bool,
}

fn store_down() -> AppError {
    AppError::from(sqlx::Error::PoolTimedOut)
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            fail_logs: true,
            ..Self::default()
        }
    }

    pub fn failing_logs() -> Self {
        Self {
            fail_logs: true,
            ..Self::default()
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail_all { Err(store_down()) } else { Ok(()) }
    }

    fn check_logs(&self) -> Result<(), AppError> {
        if self.fail_logs { Err(store_down()) } else { Ok(()) }
    }

    pub fn seed_security_event(&self, event: SecurityEvent) {
        self.state().security_events.push(event);
    }

    pub fn seed_user(&self, email: &str, password: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: "Site Owner".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
        };
        self.state().users.push((user.clone(), password.to_string()));
        user
    }

    pub fn seed_admin(&self) -> User {
        self.seed_user(ADMIN_EMAIL, ADMIN_PASSWORD)
    }

    pub fn seed_testimonial(&self, approved: bool, featured: bool) -> Testimonial {
        let testimonial = Testimonial {
            id: Uuid::new_v4(),
            author_name: "Ada".to_string(),
            content: "Great work".to_string(),
            rating: 5,
            is_approved: approved,
            is_featured: featured,
            created_at: Utc::now(),
            ..Testimonial::default()
        };
        self.state().testimonials.push(testimonial.clone());
        testimonial
    }

    pub fn seed_reset(&self, user_id: Uuid, token_hash: &str, expires_at: DateTime<Utc>) -> PasswordReset {
        let reset = PasswordReset {
            id: Uuid::new_v4(),
            user_id,
            expires_at,
            used_at: None,
        };
        self.state().resets.push((reset.clone(), token_hash.to_string()));
        reset
    }

    pub fn security_events(&self) -> Vec<SecurityEvent> {
        self.state().security_events.clone()
    }

    pub fn security_events_of(&self, event_type: &str) -> Vec<SecurityEvent> {
        self.security_events().into_iter().filter(|event| event.event_type == event_type).collect()
    }

    pub fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.state().audit_entries.clone()
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.state().sessions.clone()
    }

    pub fn resets(&self) -> Vec<PasswordReset> {
        self.state().resets.iter().map(|(reset, _)| reset.clone()).collect()
    }

    pub fn password_of(&self, user_id: &Uuid) -> Option<String> {
        self.state().users.iter().find(|(user, _)| user.id == *user_id).map(|(_, password)| password.clone())
    }

    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.state().contact_messages.clone()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.state().projects.clone()
    }
}

fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>, limit: i64) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows.truncate(usize::try_from(limit).unwrap_or(0));
    rows
}

#[async_trait::async_trait]
impl SecurityLogRepository for MockRepository {
    async fn insert_security_event(&self, event: &NewSecurityEvent) -> Result<(), AppError> {
        self.check_logs()?;
        self.state().security_events.push(SecurityEvent {
            id: Uuid::new_v4(),
            event_type: event.event_type.clone(),
            email: event.email.clone(),
            ip_address: event.ip_address.clone(),
            device_type: event.device_type.clone(),
            user_agent: event.user_agent.clone(),
            details: event.details.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn count_security_events_since(&self, event_type: &str, ip_address: &str, since: DateTime<Utc>) -> Result<i64, AppError> {
        self.check_logs()?;
        let count = self
            .state()
            .security_events
            .iter()
            .filter(|event| event.event_type == event_type && event.ip_address == ip_address && event.created_at >= since)
            .count();
        Ok(count as i64)
    }

    async fn list_recent_security_events(&self, limit: i64) -> Result<Vec<SecurityEvent>, AppError> {
        self.check_logs()?;
        Ok(newest_first(&self.state().security_events, |event| event.created_at, limit))
    }
}

#[async_trait::async_trait]
impl AuditLogRepository for MockRepository {
    async fn insert_audit_log(&self, entry: &NewAuditLogEntry) -> Result<(), AppError> {
        self.check_logs()?;
        self.state().audit_entries.push(AuditLogEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            action: entry.action.clone(),
            table_name: entry.table_name.clone(),
            record_id: entry.record_id.clone(),
            old_data: entry.old_data.clone(),
            new_data: entry.new_data.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_recent_audit_logs(&self, limit: i64) -> Result<Vec<AuditLogEntry>, AppError> {
        self.check_logs()?;
        Ok(newest_first(&self.state().audit_entries, |entry| entry.created_at, limit))
    }
}

#[async_trait::async_trait]
impl UserRepository for MockRepository {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        let email = email.trim();
        Ok(self
            .state()
            .users
            .iter()
            .find(|(user, _)| user.email.eq_ignore_ascii_case(email))
            .map(|(user, _)| user.clone()))
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        self.check()?;
        Ok(self.state().users.iter().find(|(user, _)| user.id == *id).map(|(user, _)| user.clone()))
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        let email = email.trim();
        Ok(self
            .state()
            .users
            .iter()
            .find(|(user, stored)| user.email.eq_ignore_ascii_case(email) && stored == password)
            .map(|(user, _)| user.clone()))
    }

    async fn update_user_password(&self, id: &Uuid, new_password: &str) -> Result<(), AppError> {
        self.check()?;
        let mut state = self.state();
        let (_, stored) = state.users.iter_mut().find(|(user, _)| user.id == *id).ok_or(AppError::UserNotFound)?;
        *stored = new_password.to_string();
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionRepository for MockRepository {
    async fn create_session(&self, user_id: &Uuid, expires_at: DateTime<Utc>) -> Result<Session, AppError> {
        self.check()?;
        let session = Session {
            id: Uuid::new_v4(),
            user_id: *user_id,
            created_at: Utc::now(),
            expires_at,
        };
        self.state().sessions.push(session.clone());
        Ok(session)
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<(), AppError> {
        self.check()?;
        self.state().sessions.retain(|session| session.id != *session_id);
        Ok(())
    }

    async fn invalidate_all_user_sessions(&self, user_id: &Uuid) -> Result<u64, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.sessions.len();
        state.sessions.retain(|session| session.user_id != *user_id);
        Ok((before - state.sessions.len()) as u64)
    }
}

#[async_trait::async_trait]
impl PasswordResetRepository for MockRepository {
    async fn create_password_reset(&self, user_id: &Uuid, token_hash: &str, expires_at: DateTime<Utc>) -> Result<PasswordReset, AppError> {
        self.check()?;
        Ok(self.seed_reset(*user_id, token_hash, expires_at))
    }

    async fn get_password_reset_by_token(&self, token_hash: &str) -> Result<Option<PasswordReset>, AppError> {
        self.check()?;
        Ok(self.state().resets.iter().find(|(_, hash)| hash == token_hash).map(|(reset, _)| reset.clone()))
    }

    async fn mark_password_reset_used(&self, reset_id: &Uuid) -> Result<(), AppError> {
        self.check()?;
        if let Some((reset, _)) = self.state().resets.iter_mut().find(|(reset, _)| reset.id == *reset_id) {
            reset.used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_password_resets_for_user(&self, user_id: &Uuid) -> Result<(), AppError> {
        self.check()?;
        self.state().resets.retain(|(reset, _)| reset.user_id != *user_id);
        Ok(())
    }
}

fn apply_project_request(project: &mut Project, request: &ProjectRequest) {
    project.title = request.title.clone();
    project.description = request.description.clone();
    project.content = request.content.clone();
    project.tech_stack = request.tech_stack.clone();
    project.repo_url = request.repo_url.clone();
    project.live_url = request.live_url.clone();
    project.image_url = request.image_url.clone();
    project.is_featured = request.is_featured;
    project.updated_at = Utc::now();
}

#[async_trait::async_trait]
impl ProjectRepository for MockRepository {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.check()?;
        Ok(self.projects())
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        self.check()?;
        Ok(self.state().projects.iter().find(|project| project.id == *id).cloned())
    }

    async fn create_project(&self, request: &ProjectRequest) -> Result<Project, AppError> {
        self.check()?;
        let mut project = Project {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            ..Project::default()
        };
        apply_project_request(&mut project, request);
        self.state().projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &Uuid, request: &ProjectRequest) -> Result<Option<Project>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.projects.iter_mut().find(|project| project.id == *id).map(|project| {
            apply_project_request(project, request);
            project.clone()
        }))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.projects.len();
        state.projects.retain(|project| project.id != *id);
        Ok(state.projects.len() < before)
    }

    async fn delete_projects(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.projects.len();
        state.projects.retain(|project| !ids.contains(&project.id));
        Ok((before - state.projects.len()) as u64)
    }

    async fn increment_project_views(&self, id: &Uuid) -> Result<Option<ProjectMetrics>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.projects.iter_mut().find(|project| project.id == *id).map(|project| {
            project.views += 1;
            ProjectMetrics {
                views: project.views,
                likes: project.likes,
            }
        }))
    }

    async fn increment_project_likes(&self, id: &Uuid) -> Result<Option<ProjectMetrics>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.projects.iter_mut().find(|project| project.id == *id).map(|project| {
            project.likes += 1;
            ProjectMetrics {
                views: project.views,
                likes: project.likes,
            }
        }))
    }

    async fn reset_project_metrics(&self) -> Result<u64, AppError> {
        self.check()?;
        let mut state = self.state();
        for project in state.projects.iter_mut() {
            project.views = 0;
            project.likes = 0;
        }
        Ok(state.projects.len() as u64)
    }
}

#[async_trait::async_trait]
impl TestimonialRepository for MockRepository {
    async fn create_testimonial(&self, request: &TestimonialRequest) -> Result<Testimonial, AppError> {
        self.check()?;
        let testimonial = Testimonial {
            id: Uuid::new_v4(),
            author_name: request.author_name.clone(),
            author_role: request.author_role.clone(),
            company: request.company.clone(),
            email: request.email.clone(),
            content: request.content.clone(),
            rating: request.rating,
            is_approved: false,
            is_featured: false,
            created_at: Utc::now(),
        };
        self.state().testimonials.push(testimonial.clone());
        Ok(testimonial)
    }

    async fn list_approved_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        self.check()?;
        let mut approved: Vec<Testimonial> = self.state().testimonials.iter().filter(|t| t.is_approved).cloned().collect();
        approved.sort_by_key(|t| std::cmp::Reverse((t.is_featured, t.created_at)));
        Ok(approved)
    }

    async fn list_all_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        self.check()?;
        Ok(self.state().testimonials.clone())
    }

    async fn get_testimonial_by_id(&self, id: &Uuid) -> Result<Option<Testimonial>, AppError> {
        self.check()?;
        Ok(self.state().testimonials.iter().find(|t| t.id == *id).cloned())
    }

    async fn approve_testimonial(&self, id: &Uuid) -> Result<Option<Testimonial>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.testimonials.iter_mut().find(|t| t.id == *id).map(|t| {
            t.is_approved = true;
            t.clone()
        }))
    }

    async fn set_testimonial_featured(&self, id: &Uuid, featured: bool) -> Result<Option<Testimonial>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.testimonials.iter_mut().find(|t| t.id == *id).map(|t| {
            t.is_featured = featured;
            t.clone()
        }))
    }

    async fn delete_testimonial(&self, id: &Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.testimonials.len();
        state.testimonials.retain(|t| t.id != *id);
        Ok(state.testimonials.len() < before)
    }
}

#[async_trait::async_trait]
impl ContactRepository for MockRepository {
    async fn create_contact_message(&self, request: &ContactRequest) -> Result<ContactMessage, AppError> {
        self.check()?;
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            email: request.email.clone(),
            subject: request.subject.clone(),
            message: request.message.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.state().contact_messages.push(message.clone());
        Ok(message)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.check()?;
        Ok(self.contact_messages())
    }

    async fn get_contact_message_by_id(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError> {
        self.check()?;
        Ok(self.state().contact_messages.iter().find(|m| m.id == *id).cloned())
    }

    async fn mark_contact_message_read(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.contact_messages.iter_mut().find(|m| m.id == *id).map(|m| {
            m.is_read = true;
            m.clone()
        }))
    }

    async fn delete_contact_message(&self, id: &Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.contact_messages.len();
        state.contact_messages.retain(|m| m.id != *id);
        Ok(state.contact_messages.len() < before)
    }
}

fn apply_technology_request(technology: &mut Technology, request: &TechnologyRequest) {
    technology.name = request.name.clone();
    technology.category = request.category.clone();
    technology.icon_url = request.icon_url.clone();
    technology.sort_order = request.sort_order;
}

#[async_trait::async_trait]
impl TechnologyRepository for MockRepository {
    async fn list_technologies(&self) -> Result<Vec<Technology>, AppError> {
        self.check()?;
        Ok(self.state().technologies.clone())
    }

    async fn get_technology_by_id(&self, id: &Uuid) -> Result<Option<Technology>, AppError> {
        self.check()?;
        Ok(self.state().technologies.iter().find(|t| t.id == *id).cloned())
    }

    async fn create_technology(&self, request: &TechnologyRequest) -> Result<Technology, AppError> {
        self.check()?;
        let mut technology = Technology {
            id: Uuid::new_v4(),
            ..Technology::default()
        };
        apply_technology_request(&mut technology, request);
        self.state().technologies.push(technology.clone());
        Ok(technology)
    }

    async fn update_technology(&self, id: &Uuid, request: &TechnologyRequest) -> Result<Option<Technology>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.technologies.iter_mut().find(|t| t.id == *id).map(|t| {
            apply_technology_request(t, request);
            t.clone()
        }))
    }

    async fn delete_technology(&self, id: &Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.technologies.len();
        state.technologies.retain(|t| t.id != *id);
        Ok(state.technologies.len() < before)
    }
}

fn apply_timeline_request(entry: &mut TimelineEntry, request: &TimelineEntryRequest) {
    entry.title = request.title.clone();
    entry.organization = request.organization.clone();
    entry.location = request.location.clone();
    entry.start_date = request.start_date;
    entry.end_date = request.end_date;
    entry.description = request.description.clone();
    entry.sort_order = request.sort_order;
}

#[async_trait::async_trait]
impl TimelineRepository for MockRepository {
    async fn list_timeline_entries(&self, kind: TimelineKind) -> Result<Vec<TimelineEntry>, AppError> {
        self.check()?;
        Ok(self.state().timeline.iter().filter(|(k, _)| *k == kind).map(|(_, e)| e.clone()).collect())
    }

    async fn get_timeline_entry(&self, kind: TimelineKind, id: &Uuid) -> Result<Option<TimelineEntry>, AppError> {
        self.check()?;
        Ok(self.state().timeline.iter().find(|(k, e)| *k == kind && e.id == *id).map(|(_, e)| e.clone()))
    }

    async fn create_timeline_entry(&self, kind: TimelineKind, request: &TimelineEntryRequest) -> Result<TimelineEntry, AppError> {
        self.check()?;
        let mut entry = TimelineEntry {
            id: Uuid::new_v4(),
            ..TimelineEntry::default()
        };
        apply_timeline_request(&mut entry, request);
        self.state().timeline.push((kind, entry.clone()));
        Ok(entry)
    }

    async fn update_timeline_entry(&self, kind: TimelineKind, id: &Uuid, request: &TimelineEntryRequest) -> Result<Option<TimelineEntry>, AppError> {
        self.check()?;
        let mut state = self.state();
        Ok(state.timeline.iter_mut().find(|(k, e)| *k == kind && e.id == *id).map(|(_, e)| {
            apply_timeline_request(e, request);
            e.clone()
        }))
    }

    async fn delete_timeline_entry(&self, kind: TimelineKind, id: &Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut state = self.state();
        let before = state.timeline.len();
        state.timeline.retain(|(k, e)| !(*k == kind && e.id == *id));
        Ok(state.timeline.len() < before)
    }
}
