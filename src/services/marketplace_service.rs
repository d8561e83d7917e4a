//! Marketplace service - tutor directory, course requests and reviews.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    qualify, review, Actor, City, ContactInfo, CourseRequest, CourseRequestUpdate, Level,
    NewCourseRequest, RequestStatus, Review, ReviewResponse, Role, ScoringPolicy, Subject,
    TutorCard, TutorDetail, TutorProfile, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{TutorSearch, UnitOfWork};

/// Marketplace use cases.
#[async_trait]
pub trait MarketplaceService: Send + Sync {
    /// Public tutor directory: validated profiles matching the filters
    async fn list_tutors(&self, search: TutorSearch) -> AppResult<Vec<TutorCard>>;

    /// Tutor detail page with the paywall applied for this viewer
    async fn tutor_detail(&self, tutor_id: Uuid, viewer: Option<&Actor>) -> AppResult<TutorDetail>;

    /// Post a new request; the qualification label is scored here, once
    async fn create_request(
        &self,
        actor: &Actor,
        data: NewCourseRequest,
    ) -> AppResult<CourseRequest>;

    /// Edit an owned request; any edit reactivates it
    async fn update_request(
        &self,
        actor: &Actor,
        request_id: Uuid,
        update: CourseRequestUpdate,
    ) -> AppResult<CourseRequest>;

    /// The parent's own requests, newest first
    async fn my_requests(&self, actor: &Actor) -> AppResult<Vec<CourseRequest>>;

    /// Tutor-facing feed of active requests
    async fn browse_requests(
        &self,
        actor: &Actor,
        city_id: Option<Uuid>,
    ) -> AppResult<Vec<CourseRequest>>;

    /// Leave a review; requires a contact unlock for the tutor
    async fn submit_review(
        &self,
        actor: &Actor,
        tutor_id: Uuid,
        rating: i16,
        comment: String,
    ) -> AppResult<Review>;

    /// Filter options for the directory and request forms
    async fn subjects(&self) -> AppResult<Vec<Subject>>;

    async fn levels(&self) -> AppResult<Vec<Level>>;

    async fn cities(&self) -> AppResult<Vec<City>>;
}

/// Concrete implementation using the Unit of Work.
pub struct Marketplace<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Marketplace<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve catalog names and user display names to build directory
    /// cards from profile aggregates.
    async fn build_cards(&self, profiles: Vec<TutorProfile>) -> AppResult<Vec<TutorCard>> {
        let subject_names: HashMap<Uuid, String> = self
            .uow
            .catalog()
            .subjects()
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();
        let level_names: HashMap<Uuid, String> = self
            .uow
            .catalog()
            .levels()
            .await?
            .into_iter()
            .map(|l| (l.id, l.name))
            .collect();
        let city_names: HashMap<Uuid, String> = self
            .uow
            .catalog()
            .cities()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let user_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
        let users: HashMap<Uuid, User> = self
            .uow
            .users()
            .find_many(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(profiles
            .into_iter()
            .map(|p| {
                let display_name = users
                    .get(&p.user_id)
                    .map(|u| u.display_name())
                    .unwrap_or_default();
                TutorCard {
                    id: p.id,
                    display_name,
                    bio: p.bio,
                    photo: p.photo,
                    city: p.city_id.and_then(|id| city_names.get(&id).cloned()),
                    quartier: p.quartier,
                    subjects: p
                        .subject_ids
                        .iter()
                        .filter_map(|id| subject_names.get(id).cloned())
                        .collect(),
                    levels: p
                        .level_ids
                        .iter()
                        .filter_map(|id| level_names.get(id).cloned())
                        .collect(),
                    is_online_class: p.is_online_class,
                    is_home_class: p.is_home_class,
                }
            })
            .collect())
    }

    /// Scoring policy from the parent's country, falling back to the
    /// platform default when none is set.
    async fn policy_for(&self, parent_id: Uuid) -> AppResult<ScoringPolicy> {
        let user = self
            .uow
            .users()
            .find_by_id(parent_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let policy = match user.country_id {
            Some(country_id) => self
                .uow
                .countries()
                .find(country_id)
                .await?
                .map(|c| c.scoring_policy())
                .unwrap_or_default(),
            None => ScoringPolicy::default(),
        };
        Ok(policy)
    }

    async fn reviews_with_authors(&self, tutor_id: Uuid) -> AppResult<Vec<ReviewResponse>> {
        let reviews = self.uow.reviews().list_for_tutor(tutor_id).await?;
        let author_ids: Vec<Uuid> = reviews.iter().map(|r| r.author_id).collect();
        let authors: HashMap<Uuid, User> = self
            .uow
            .users()
            .find_many(author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|r| ReviewResponse {
                id: r.id,
                author_name: authors
                    .get(&r.author_id)
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| "Anonyme".to_string()),
                rating: r.rating,
                comment: r.comment,
                created_at: r.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> MarketplaceService for Marketplace<U> {
    async fn list_tutors(&self, search: TutorSearch) -> AppResult<Vec<TutorCard>> {
        let profiles = self.uow.profiles().search_validated(search).await?;
        self.build_cards(profiles).await
    }

    async fn tutor_detail(&self, tutor_id: Uuid, viewer: Option<&Actor>) -> AppResult<TutorDetail> {
        let profile = self
            .uow
            .profiles()
            .find_tutor(tutor_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Non-validated profiles are unreachable, as if they did not exist
        if !profile.is_visible() {
            return Err(AppError::NotFound);
        }

        let tutor_user = self
            .uow
            .users()
            .find_by_id(profile.user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let is_unlocked = match viewer {
            Some(actor) if actor.id == profile.user_id => true,
            Some(actor) if actor.is_superuser => true,
            Some(actor) => self
                .uow
                .unlocks()
                .find(actor.id, profile.id)
                .await?
                .is_some(),
            None => false,
        };

        let reviews = self.reviews_with_authors(profile.id).await?;
        let review_count = reviews.len() as u64;
        let avg_rating = if reviews.is_empty() {
            0.0
        } else {
            let sum: i32 = reviews.iter().map(|r| i32::from(r.rating)).sum();
            let avg = f64::from(sum) / review_count as f64;
            (avg * 10.0).round() / 10.0
        };

        let contact = if is_unlocked {
            Some(ContactInfo {
                phone: tutor_user.phone.clone(),
                email: tutor_user.email.clone(),
            })
        } else {
            None
        };

        let card = self
            .build_cards(vec![profile])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("tutor card assembly failed"))?;

        Ok(TutorDetail {
            card,
            is_unlocked,
            contact,
            avg_rating,
            review_count,
            reviews,
        })
    }

    async fn create_request(
        &self,
        actor: &Actor,
        data: NewCourseRequest,
    ) -> AppResult<CourseRequest> {
        if !actor.can_post_request() {
            return Err(AppError::forbidden("Only parents can post course requests"));
        }
        if data.subject_ids.is_empty() {
            return Err(AppError::validation("Pick at least one subject"));
        }

        let policy = self.policy_for(actor.id).await?;
        let qualification = qualify(data.budget_range, data.start_time, data.intention, &policy);

        let now = Utc::now();
        self.uow
            .requests()
            .create(CourseRequest {
                id: Uuid::new_v4(),
                parent_id: actor.id,
                subject_ids: data.subject_ids,
                level_id: data.level_id,
                city_id: data.city_id,
                quartier: data.quartier,
                frequency: data.frequency,
                is_online: data.is_online,
                budget_range: data.budget_range,
                start_time: data.start_time,
                intention: data.intention,
                description: data.description,
                qualification,
                status: RequestStatus::Active,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    async fn update_request(
        &self,
        actor: &Actor,
        request_id: Uuid,
        update: CourseRequestUpdate,
    ) -> AppResult<CourseRequest> {
        let mut request = self
            .uow
            .requests()
            .find(request_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if request.parent_id != actor.id {
            return Err(AppError::forbidden("You cannot edit this request"));
        }

        if let Some(subject_ids) = update.subject_ids {
            if subject_ids.is_empty() {
                return Err(AppError::validation("Pick at least one subject"));
            }
            request.subject_ids = subject_ids;
        }
        if let Some(level_id) = update.level_id {
            request.level_id = Some(level_id);
        }
        if let Some(city_id) = update.city_id {
            request.city_id = Some(city_id);
        }
        if let Some(quartier) = update.quartier {
            request.quartier = quartier;
        }
        if let Some(frequency) = update.frequency {
            request.frequency = frequency;
        }
        if let Some(is_online) = update.is_online {
            request.is_online = is_online;
        }
        if let Some(budget_range) = update.budget_range {
            request.budget_range = budget_range;
        }
        if let Some(start_time) = update.start_time {
            request.start_time = start_time;
        }
        if let Some(intention) = update.intention {
            request.intention = intention;
        }
        if let Some(description) = update.description {
            request.description = description;
        }

        // An edit always puts the request back on the market; the stored
        // qualification is kept as scored at creation.
        request.status = RequestStatus::Active;

        self.uow.requests().update(request).await
    }

    async fn my_requests(&self, actor: &Actor) -> AppResult<Vec<CourseRequest>> {
        self.uow.requests().list_by_parent(actor.id).await
    }

    async fn browse_requests(
        &self,
        actor: &Actor,
        city_id: Option<Uuid>,
    ) -> AppResult<Vec<CourseRequest>> {
        if !actor.can_browse_requests() {
            return Err(AppError::forbidden("The request feed is reserved for tutors"));
        }
        self.uow.requests().list_active(city_id).await
    }

    async fn submit_review(
        &self,
        actor: &Actor,
        tutor_id: Uuid,
        rating: i16,
        comment: String,
    ) -> AppResult<Review> {
        if actor.role != Role::Parent {
            return Err(AppError::forbidden("Only parents can review tutors"));
        }
        if !review::rating_in_range(rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let profile = self
            .uow
            .profiles()
            .find_tutor(tutor_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !profile.is_visible() {
            return Err(AppError::NotFound);
        }

        // Review eligibility is tied to a paid unlock
        if self.uow.unlocks().find(actor.id, tutor_id).await?.is_none() {
            return Err(AppError::forbidden(
                "Unlock this tutor's contact before leaving a review",
            ));
        }

        if self
            .uow
            .reviews()
            .find_by_tutor_author(tutor_id, actor.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Review"));
        }

        self.uow
            .reviews()
            .create(Review {
                id: Uuid::new_v4(),
                tutor_id,
                author_id: actor.id,
                rating,
                comment,
                created_at: Utc::now(),
            })
            .await
    }

    async fn subjects(&self) -> AppResult<Vec<Subject>> {
        self.uow.catalog().subjects().await
    }

    async fn levels(&self) -> AppResult<Vec<Level>> {
        self.uow.catalog().levels().await
    }

    async fn cities(&self) -> AppResult<Vec<City>> {
        self.uow.catalog().cities().await
    }
}
