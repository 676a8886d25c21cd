//! View controller: the single entry point the shell drives.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use recursos_auth::IdentityDecoder;
use recursos_core::config::AppConfig;
use recursos_core::error::AppError;
use recursos_core::result::AppResult;
use recursos_core::traits::{StateStore, UploadGateway, UploadTarget};
use recursos_core::types::AccessToken;
use recursos_entity::{
    Breadcrumb, Resource, ResourceId, ResourcePatch, Section, Theme, User,
};

use crate::mutator::{Mutation, ResourceMutator};
use crate::navigator::{self, FolderView};
use crate::save::{self, SaveRequest, UrlSource};
use crate::state::{AppState, SectionChange};
use crate::store::ResourceStore;

/// Everything needed to render the current screen.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    /// Active section.
    pub section: Section,
    /// Page title.
    pub title: String,
    /// Trail to the current folder.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Folder being listed.
    pub current_folder: Option<ResourceId>,
    /// Direct children of the current folder.
    pub listing: Vec<Resource>,
    /// Signed-in user.
    pub user: Option<User>,
    /// Whether the add/edit/delete controls are offered.
    pub can_add_resources: bool,
    /// Whether uploads may proceed.
    pub storage_authorized: bool,
    /// Whether the sign-in prompt is showing.
    pub login_prompt: bool,
    /// Color theme.
    pub theme: Theme,
    /// Upload bucket chosen in settings.
    pub bucket_name: Option<String>,
}

/// Result of activating a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A folder was entered.
    Entered(FolderView),
    /// The resource should be opened at this URL.
    External(String),
    /// The resource is protected and nobody is signed in.
    LoginRequired,
    /// The resource has nothing to open.
    NoLink(String),
}

/// Result of a sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    /// The signed-in user.
    pub user: User,
    /// Section entered because it was waiting on this sign-in.
    pub entered: Option<Section>,
}

/// Sections with a save in progress.
#[derive(Debug, Clone, Default)]
struct InFlight(Arc<Mutex<HashSet<Section>>>);

impl InFlight {
    /// Claim `section`, or `None` if a save is already running there.
    fn claim(&self, section: Section) -> Option<SaveGuard> {
        let mut sections = self.0.lock().unwrap_or_else(|e| e.into_inner());
        sections
            .insert(section)
            .then(|| SaveGuard {
                in_flight: self.clone(),
                section,
            })
    }

    fn is_saving(&self, section: Section) -> bool {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&section)
    }
}

/// Releases the section's in-flight claim when dropped, even if the save
/// future is cancelled midway.
#[derive(Debug)]
struct SaveGuard {
    in_flight: InFlight,
    section: Section,
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.in_flight
            .0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.section);
    }
}

/// Coordinates sections, authentication, persistence, and uploads.
#[derive(Debug, Clone)]
pub struct ViewController {
    /// All mutable portal state.
    state: Arc<RwLock<AppState>>,
    /// Section lists and settings persistence.
    store: ResourceStore,
    /// Upload provider for file-backed resources.
    gateway: Arc<dyn UploadGateway>,
    /// Identity assertion decoder.
    identity: IdentityDecoder,
    /// Mutation stamping.
    mutator: ResourceMutator,
    /// Sections with a save in progress.
    in_flight: InFlight,
}

impl ViewController {
    /// Load every section and the saved settings, and start on the
    /// configured section.
    pub async fn init(
        config: &AppConfig,
        state_store: Arc<dyn StateStore>,
        gateway: Arc<dyn UploadGateway>,
    ) -> AppResult<Self> {
        let store = ResourceStore::new(state_store);

        let mut initial = config
            .app
            .initial_section
            .parse::<Section>()
            .map_err(AppError::configuration)?;
        if initial.is_protected() {
            warn!(section = %initial, "Initial section requires sign-in, starting on the public section");
            initial = Section::CentrosEscolares;
        }

        let mut lists = Vec::with_capacity(Section::ALL.len());
        for section in Section::ALL {
            lists.push((section, store.load_section(section).await));
        }

        let mut state = AppState::new(initial, lists);
        state.theme = store.load_theme().await;
        state.bucket_name = store
            .load_bucket_name()
            .await
            .or_else(|| config.storage.gcs.bucket.clone());

        info!(
            section = %initial,
            provider = gateway.provider_type(),
            "Portal state initialized"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            store,
            gateway,
            identity: IdentityDecoder::new(&config.auth),
            mutator: ResourceMutator::new(config.app.default_user_name.clone()),
            in_flight: InFlight::default(),
        })
    }

    /// Current screen.
    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.read().await;
        let section = state.active_section;
        let active = state.active();
        let view = active.view();

        ViewSnapshot {
            section,
            title: navigator::page_title(section, &view.breadcrumbs),
            breadcrumbs: view.breadcrumbs,
            current_folder: active.navigation.current_folder,
            listing: view.listing,
            user: state.session.user().cloned(),
            can_add_resources: state.session.is_signed_in(),
            storage_authorized: state.session.is_authorized(),
            login_prompt: state.login_prompt,
            theme: state.theme,
            bucket_name: state.bucket_name.clone(),
        }
    }

    /// Folders offered as destinations in the active section.
    pub async fn available_folders(&self, editing: Option<ResourceId>) -> Vec<Resource> {
        let state = self.state.read().await;
        navigator::available_folders(&state.active().resources, editing)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resource with `id` in the active section.
    pub async fn find(&self, id: ResourceId) -> Option<Resource> {
        self.state.read().await.active().find(id).cloned()
    }

    /// Ask to enter `section`.
    pub async fn select_section(&self, section: Section) -> SectionChange {
        self.state.write().await.select_section(section)
    }

    /// Close the sign-in prompt without signing in.
    pub async fn dismiss_login_prompt(&self) {
        self.state.write().await.dismiss_login_prompt();
    }

    /// Sign in with an identity assertion.
    pub async fn sign_in(&self, assertion: &str) -> AppResult<SignIn> {
        let user = self.identity.decode(assertion)?;
        let entered = self.sign_in_user(user.clone()).await;
        Ok(SignIn { user, entered })
    }

    /// Sign in an already verified user.
    pub async fn sign_in_user(&self, user: User) -> Option<Section> {
        self.state.write().await.complete_sign_in(user)
    }

    /// Sign out. Returns the section shown instead if the active one was
    /// protected.
    pub async fn sign_out(&self) -> Option<Section> {
        self.state.write().await.sign_out()
    }

    /// Store the bearer token granted by the storage provider.
    pub async fn authorize_storage(&self, token: &str) -> AppResult<()> {
        let token = AccessToken::new(token)
            .ok_or_else(|| AppError::validation("Access token cannot be empty"))?;
        let mut state = self.state.write().await;
        if !state.session.grant_storage(token) {
            return Err(AppError::authentication(
                "Sign in before authorizing storage access",
            ));
        }
        info!(provider = self.gateway.provider_type(), "Storage access authorized");
        Ok(())
    }

    /// Whether uploads may proceed.
    pub async fn is_authorized(&self) -> bool {
        self.state.read().await.session.is_authorized()
    }

    /// Enter `folder` (`None` for the root) in the active section.
    pub async fn navigate(&self, folder: Option<ResourceId>) -> FolderView {
        self.state.write().await.navigate(folder)
    }

    /// Activate the row for `id`: enter folders, open everything else.
    pub async fn open(&self, id: ResourceId) -> AppResult<OpenOutcome> {
        let mut state = self.state.write().await;
        let resource = state
            .active()
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;

        if resource.is_folder() {
            return Ok(OpenOutcome::Entered(state.navigate(Some(id))));
        }
        if let Some(url) = resource.url.filter(|u| !u.is_empty()) {
            return Ok(OpenOutcome::External(url));
        }
        if resource.is_protected && !state.session.is_signed_in() {
            state.login_prompt = true;
            return Ok(OpenOutcome::LoginRequired);
        }
        Ok(OpenOutcome::NoLink(resource.name))
    }

    /// Validate and apply a resource form in the active section.
    ///
    /// File-backed resources with a new file are uploaded first; the list
    /// is only touched once the upload has produced a URL. Returns the
    /// saved resource, or `None` when the edited resource no longer exists.
    pub async fn save(&self, request: SaveRequest) -> AppResult<Option<Resource>> {
        let (section, plan, token, bucket) = {
            let state = self.state.read().await;
            let section = state.active_section;
            let active = state.section(section);
            let existing = request.id.and_then(|id| active.find(id));
            let plan = save::plan(request, &active.resources, existing)?;

            if plan.needs_upload() && !state.session.is_authorized() {
                return Err(AppError::authorization(
                    "Storage authorization is required to upload files",
                ));
            }
            (
                section,
                plan,
                state.session.storage_token().cloned(),
                state.bucket_name.clone(),
            )
        };

        let _guard = self.in_flight.claim(section).ok_or_else(|| {
            AppError::conflict(format!("A save is already in progress in {section}"))
        })?;

        let url = match plan.url.clone() {
            UrlSource::Ready(url) => url,
            UrlSource::Upload(file) => {
                let target = UploadTarget {
                    destination: section.slug(),
                    container: bucket.as_deref(),
                };
                let name = file.name.clone();
                let url = self.gateway.upload(token.as_ref(), target, file).await?;
                info!(section = %section, file = %name, "File uploaded");
                Some(url)
            }
        };

        let (id, fields) = plan.into_fields(url);
        let mut state = self.state.write().await;
        let stamp = self.mutator.stamp(state.session.user());
        let current = &state.section(section).resources;

        let mutation = match id {
            None => Some(self.mutator.create(current, fields, &stamp)),
            Some(id) => {
                let mutation =
                    self.mutator
                        .update(current, id, &ResourcePatch::from(fields), &stamp);
                if mutation.is_none() {
                    warn!(section = %section, id, "Edited resource no longer exists");
                }
                mutation
            }
        };

        match mutation {
            Some(mutation) => {
                let saved = mutation.affected.clone();
                self.commit(&mut state, section, mutation).await?;
                Ok(Some(saved))
            }
            None => Ok(None),
        }
    }

    /// Remove a resource from the active section.
    ///
    /// Returns `None` when no resource has that ID.
    pub async fn delete(&self, id: ResourceId) -> AppResult<Option<Resource>> {
        let mut state = self.state.write().await;
        let section = state.active_section;
        let Some(mutation) = self.mutator.delete(&state.section(section).resources, id) else {
            return Ok(None);
        };
        let removed = mutation.affected.clone();
        self.commit(&mut state, section, mutation).await?;
        info!(section = %section, id, name = %removed.name, "Resource removed");
        Ok(Some(removed))
    }

    /// Whether a save is running in `section`.
    pub fn is_saving(&self, section: Section) -> bool {
        self.in_flight.is_saving(section)
    }

    /// Flip between light and dark and persist the choice.
    pub async fn toggle_theme(&self) -> AppResult<Theme> {
        let mut state = self.state.write().await;
        let theme = state.theme.toggled();
        self.store.save_theme(theme).await?;
        state.theme = theme;
        Ok(theme)
    }

    /// Set the upload bucket; a blank name clears it.
    pub async fn set_bucket_name(&self, name: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        self.store.save_bucket_name(name).await?;
        let name = name.trim();
        state.bucket_name = (!name.is_empty()).then(|| name.to_string());
        Ok(())
    }

    /// Persist the new list, then make it current.
    async fn commit(
        &self,
        state: &mut AppState,
        section: Section,
        mutation: Mutation,
    ) -> AppResult<()> {
        self.store
            .save_section(section, &mutation.resources)
            .await
            .inspect_err(|e| {
                warn!(section = %section, error = %e, "Failed to persist resources, change discarded")
            })?;
        state.section_mut(section).replace_resources(mutation.resources);
        Ok(())
    }
}
