//! Application state and its transitions.
//!
//! All mutable portal state lives in one [`AppState`]. Navigation state is
//! kept per section, so switching sections preserves where the user was.

use tracing::{debug, info};

use recursos_auth::AuthSession;
use recursos_entity::{Breadcrumb, Resource, ResourceId, Section, Theme, User};

use crate::navigator::{self, FolderView};

/// Where the user is inside one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Folder being listed; `None` for the section root.
    pub current_folder: Option<ResourceId>,
    /// Cached trail for `current_folder`.
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            current_folder: None,
            breadcrumbs: vec![Breadcrumb::root()],
        }
    }
}

/// One section's list and navigation.
#[derive(Debug, Clone, Default)]
pub struct SectionState {
    /// The flat resource list.
    pub resources: Vec<Resource>,
    /// Current folder and trail.
    pub navigation: Navigation,
}

impl SectionState {
    /// Creates a section state at the root of `resources`.
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            resources,
            navigation: Navigation::default(),
        }
    }

    /// The resource with `id`.
    pub fn find(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Listing and trail for the current folder.
    pub fn view(&self) -> FolderView {
        FolderView {
            listing: navigator::list_children(&self.resources, self.navigation.current_folder),
            breadcrumbs: self.navigation.breadcrumbs.clone(),
        }
    }

    /// Replace the list and refresh the cached trail against it.
    pub fn replace_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
        self.navigation.breadcrumbs =
            navigator::build_breadcrumbs(&self.resources, self.navigation.current_folder);
    }
}

/// Result of asking to enter a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionChange {
    /// The section is now active.
    Switched(Section),
    /// Already on that section.
    Unchanged(Section),
    /// Sign-in is needed first; the switch happens after sign-in.
    LoginRequired(Section),
}

/// The portal's entire mutable state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Signed-in user and storage authorization.
    pub session: AuthSession,
    /// Section being shown.
    pub active_section: Section,
    /// Protected section to enter once sign-in completes.
    pub pending_section: Option<Section>,
    /// Whether the sign-in prompt is showing.
    pub login_prompt: bool,
    /// Color theme.
    pub theme: Theme,
    /// Upload bucket chosen in settings.
    pub bucket_name: Option<String>,
    sections: [SectionState; 3],
}

/// Position of `section` in [`AppState`]'s section slots.
fn slot(section: Section) -> usize {
    match section {
        Section::Monitoreo => 0,
        Section::Supervision => 1,
        Section::CentrosEscolares => 2,
    }
}

impl AppState {
    /// Creates the state from loaded section lists.
    pub fn new(
        active_section: Section,
        lists: impl IntoIterator<Item = (Section, Vec<Resource>)>,
    ) -> Self {
        let mut sections: [SectionState; 3] = Default::default();
        for (section, resources) in lists {
            sections[slot(section)] = SectionState::new(resources);
        }

        Self {
            session: AuthSession::anonymous(),
            active_section,
            pending_section: None,
            login_prompt: false,
            theme: Theme::default(),
            bucket_name: None,
            sections,
        }
    }

    /// State of `section`.
    pub fn section(&self, section: Section) -> &SectionState {
        &self.sections[slot(section)]
    }

    /// Mutable state of `section`.
    pub fn section_mut(&mut self, section: Section) -> &mut SectionState {
        &mut self.sections[slot(section)]
    }

    /// State of the active section.
    pub fn active(&self) -> &SectionState {
        self.section(self.active_section)
    }

    /// Change the navigation of one section, leaving the others untouched.
    pub fn update_navigation(&mut self, section: Section, navigation: Navigation) {
        self.section_mut(section).navigation = navigation;
    }

    /// Enter `target` in the active section and cache the result.
    pub fn navigate(&mut self, target: Option<ResourceId>) -> FolderView {
        let section = self.active_section;
        let view = navigator::navigate(&self.section(section).resources, target);
        self.update_navigation(
            section,
            Navigation {
                current_folder: target,
                breadcrumbs: view.breadcrumbs.clone(),
            },
        );
        view
    }

    /// Ask to make `section` active.
    ///
    /// Protected sections need a signed-in user; without one the request
    /// is remembered and the sign-in prompt is raised.
    pub fn select_section(&mut self, section: Section) -> SectionChange {
        if section.is_protected() && !self.session.is_signed_in() {
            info!(section = %section, "Sign-in required to enter section");
            self.pending_section = Some(section);
            self.login_prompt = true;
            return SectionChange::LoginRequired(section);
        }
        if section == self.active_section {
            return SectionChange::Unchanged(section);
        }
        debug!(from = %self.active_section, to = %section, "Switching section");
        self.active_section = section;
        SectionChange::Switched(section)
    }

    /// Record a sign-in and complete any deferred section switch.
    pub fn complete_sign_in(&mut self, user: User) -> Option<Section> {
        self.session.sign_in(user);
        self.login_prompt = false;
        let pending = self.pending_section.take()?;
        self.active_section = pending;
        Some(pending)
    }

    /// Sign out; a protected active section falls back to the public one.
    pub fn sign_out(&mut self) -> Option<Section> {
        self.session.sign_out();
        self.pending_section = None;
        self.login_prompt = false;
        if self.active_section.is_protected() {
            self.active_section = Section::CentrosEscolares;
            return Some(self.active_section);
        }
        None
    }

    /// Close the sign-in prompt and forget the deferred switch.
    pub fn dismiss_login_prompt(&mut self) {
        self.login_prompt = false;
        self.pending_section = None;
    }
}
