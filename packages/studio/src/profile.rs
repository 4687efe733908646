//! The site owner's profile: a single record with an explicit load/persist
//! lifecycle, stored under [`about::PROFILE_ID`].

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};

use crate::entity::about::{self, PROFILE_ID};

/// Project counters shown as progress bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub completed: i32,
    pub progress: i32,
    pub hosted: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub logo_url: Option<String>,
    pub profile_img: Option<String>,
    pub bio_content: Option<String>,
    pub stack_list: Option<String>,
    pub counters: Counters,
}

impl Profile {
    /// Profile shown before the admin has saved one.
    pub fn synthesized(owner_name: &str) -> Self {
        Self {
            full_name: owner_name.to_string(),
            logo_url: None,
            profile_img: None,
            bio_content: None,
            stack_list: None,
            counters: Counters::default(),
        }
    }

    pub fn stack_items(&self) -> Vec<&str> {
        self.stack_list
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn total_projects(&self) -> i32 {
        self.counters
            .completed
            .saturating_add(self.counters.progress)
    }

    /// Share of completed projects, 0-100.
    pub fn completion_percent(&self) -> i32 {
        let total = i64::from(self.total_projects());
        if total <= 0 {
            return 0;
        }
        (i64::from(self.counters.completed) * 100 / total) as i32
    }

    /// Merge an admin submission into this profile.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.full_name {
            self.full_name = name;
        }
        if let Some(stack) = update.stack_list {
            self.stack_list = stack;
        }
        if let Some(bio) = update.bio_content {
            self.bio_content = bio;
        }
        if let Some(path) = update.profile_img {
            self.profile_img = Some(path);
        }
        if let Some(path) = update.logo_url {
            self.logo_url = Some(path);
        }
        self.counters = update.counters;
    }
}

impl From<about::Model> for Profile {
    fn from(model: about::Model) -> Self {
        Self {
            full_name: model.full_name,
            logo_url: model.logo_url,
            profile_img: model.profile_img,
            bio_content: model.bio_content,
            stack_list: model.stack_list,
            counters: Counters {
                completed: model.completed,
                progress: model.progress,
                hosted: model.hosted,
            },
        }
    }
}

/// Fields submitted from the admin profile form.
///
/// `None` leaves the stored value alone. For the nullable text fields
/// `Some(None)` clears them. Counters are always written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub stack_list: Option<Option<String>>,
    pub bio_content: Option<Option<String>>,
    pub profile_img: Option<String>,
    pub logo_url: Option<String>,
    pub counters: Counters,
}

#[derive(Clone)]
pub struct ProfileStore {
    db: DatabaseConnection,
    owner_name: String,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection, owner_name: impl Into<String>) -> Self {
        Self {
            db,
            owner_name: owner_name.into(),
        }
    }

    /// The stored profile, or a synthesized default when none was saved yet.
    pub async fn load(&self) -> Result<Profile, DbErr> {
        let stored = about::Entity::find_by_id(PROFILE_ID).one(&self.db).await?;
        Ok(stored
            .map(Profile::from)
            .unwrap_or_else(|| Profile::synthesized(&self.owner_name)))
    }

    /// Write the profile row, creating it on first save.
    pub async fn persist(&self, profile: &Profile) -> Result<(), DbErr> {
        let model = about::ActiveModel {
            id: Set(PROFILE_ID),
            full_name: Set(profile.full_name.clone()),
            logo_url: Set(profile.logo_url.clone()),
            profile_img: Set(profile.profile_img.clone()),
            bio_content: Set(profile.bio_content.clone()),
            stack_list: Set(profile.stack_list.clone()),
            completed: Set(profile.counters.completed),
            progress: Set(profile.counters.progress),
            hosted: Set(profile.counters.hosted),
            updated_at: Set(Utc::now()),
        };

        about::Entity::insert(model)
            .on_conflict(
                OnConflict::column(about::Column::Id)
                    .update_columns([
                        about::Column::FullName,
                        about::Column::LogoUrl,
                        about::Column::ProfileImg,
                        about::Column::BioContent,
                        about::Column::StackList,
                        about::Column::Completed,
                        about::Column::Progress,
                        about::Column::Hosted,
                        about::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    /// Load, merge and persist in one step. Concurrent saves are last-write-wins.
    pub async fn update(&self, update: ProfileUpdate) -> Result<Profile, DbErr> {
        let mut profile = self.load().await?;
        profile.apply(update);
        self.persist(&profile).await?;
        Ok(profile)
    }
}
