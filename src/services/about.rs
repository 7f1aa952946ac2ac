//! The public About page: founders message and active team, assembled from
//! three independent reads that each degrade on failure.

use moka::future::Cache;
use serde::Serialize;
use std::{
    collections::HashMap,
    fmt::Display,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use crate::database::models::{FoundersMessage, PublicTeamMember, TeamMember, TeamMemberImage};
use crate::database::repositories::{
    FoundersMessageRepository, TeamMemberImageRepository, TeamMemberRepository,
};

const ABOUT_KEY: &str = "about";
const CACHE_TTL: Duration = Duration::from_secs(60);

pub const INTRO: &str = "The Institute of Policy and Law Reform is dedicated to advancing education \
through innovative research, publications, and professional development programs.";

pub const MISSION: [&str; 2] = [
    "We strive to bridge the gap between academic research and practical application, \
fostering innovation in educational methodologies and professional development practices.",
    "Our interdisciplinary approach brings together experts from various fields to address \
the evolving challenges in modern education and workplace learning.",
];

/// Roster shown when the team table cannot be read.
pub const DEFAULT_ROSTER: [(&str, &str, &str); 6] = [
    (
        "Samaviya Sajjad",
        "Founder & Director",
        "Samaviya Sajjad is a graduate of the University of California, Berkeley, and the founder of the Institute of Policy and Law Reform (IPLR), a consultancy and research institute committed to legal reform, education, and accessibility.",
    ),
    (
        "Sundus Rauf",
        "Senior Research Associate - Legal & Policy Development, PhD Candidate in Forensic Science",
        "An experienced legal researcher and academic with a strong background in criminology, human rights law, and legal reform.",
    ),
    (
        "Deeya Farukh Niaz",
        "Senior Research Associate - Litigation Department",
        "Deeya is a graduate of University of Law, London, UK. A dedicated advocate specializing in human rights, environmental law, and corporate litigation.",
    ),
    (
        "Laiba Bashir",
        "Senior Research Associate - Environmental Policy & Sustainability",
        "An environmental engineer specializing in climate action, sustainability, and environmental impact assessments.",
    ),
    (
        "Ayesha Imam",
        "Research Associate",
        "A research associate at IPLR for the past two years, Ayesha has played a key role in researching various environmental aspects.",
    ),
    (
        "Ume Rubab",
        "Research Associate - Legal & Policy Initiatives",
        "A dedicated legal researcher and active member of IPLR's research team.",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamSource {
    Database,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub intro: String,
    pub mission: Vec<String>,
    pub founders_message: Option<FoundersMessage>,
    pub team: Vec<PublicTeamMember>,
    pub team_source: TeamSource,
    /// Set when any read failed; such pages are served but never cached.
    #[serde(skip)]
    pub degraded: bool,
}

pub fn default_roster() -> Vec<PublicTeamMember> {
    DEFAULT_ROSTER
        .iter()
        .map(|(name, title, description)| PublicTeamMember {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
        })
        .collect()
}

/// Builds the page from the three reads. Failed reads are logged and replaced:
/// the team by the built-in roster, the founders message by nothing, legacy
/// images by none. An empty team table stays empty.
pub fn compose_about<E: Display>(
    team: Result<Vec<TeamMember>, E>,
    founders_message: Result<Option<FoundersMessage>, E>,
    legacy_images: Result<Vec<TeamMemberImage>, E>,
) -> AboutPage {
    let degraded = team.is_err() || founders_message.is_err() || legacy_images.is_err();

    let legacy_images: HashMap<String, String> = match legacy_images {
        Ok(images) => images
            .into_iter()
            .map(|image| (image.name, image.image_url))
            .collect(),
        Err(e) => {
            log::error!("Error fetching team member images: {}", e);
            HashMap::new()
        }
    };

    let (team, team_source) = match team {
        Ok(members) => (
            members.into_iter().map(PublicTeamMember::from).collect(),
            TeamSource::Database,
        ),
        Err(e) => {
            log::error!("Error fetching team members: {}", e);
            (default_roster(), TeamSource::Fallback)
        }
    };

    let team = team
        .into_iter()
        .map(|mut member: PublicTeamMember| {
            if member.image_url.is_none() {
                member.image_url = legacy_images.get(&member.name).cloned();
            }
            member
        })
        .collect();

    let founders_message = founders_message.unwrap_or_else(|e| {
        log::error!("Error fetching founders message: {}", e);
        None
    });

    AboutPage {
        intro: INTRO.to_string(),
        mission: MISSION.iter().map(|p| p.to_string()).collect(),
        founders_message,
        team,
        team_source,
        degraded,
    }
}

#[derive(Clone)]
pub struct AboutService {
    team_repository: TeamMemberRepository,
    founders_repository: FoundersMessageRepository,
    image_repository: TeamMemberImageRepository,
    cache: Cache<&'static str, Arc<AboutPage>>,
    /// Bumped by every invalidation; a page computed under an older
    /// generation is not stored.
    generation: Arc<AtomicU64>,
}

impl AboutService {
    pub fn new(
        team_repository: TeamMemberRepository,
        founders_repository: FoundersMessageRepository,
        image_repository: TeamMemberImageRepository,
    ) -> Self {
        Self {
            team_repository,
            founders_repository,
            image_repository,
            cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(CACHE_TTL)
                .build(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn about_page(&self) -> Arc<AboutPage> {
        if let Some(page) = self.cache.get(&ABOUT_KEY).await {
            return page;
        }

        let generation = self.generation.load(Ordering::Acquire);
        let (team, founders_message, legacy_images) = futures::join!(
            self.team_repository.list(true),
            self.founders_repository.find_current(),
            self.image_repository.list(),
        );
        let page = Arc::new(compose_about(team, founders_message, legacy_images));
        self.store(generation, page.clone()).await;

        page
    }

    async fn store(&self, generation: u64, page: Arc<AboutPage>) {
        if page.degraded {
            log::warn!("About page assembled from partial data; not caching");
            return;
        }
        if self.generation.load(Ordering::Acquire) != generation {
            return;
        }

        self.cache.insert(ABOUT_KEY, page).await;

        // An invalidation may have landed between the check and the insert
        if self.generation.load(Ordering::Acquire) != generation {
            self.cache.invalidate(&ABOUT_KEY).await;
        }
    }

    /// Drops the cached page after admin writes.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.cache.invalidate_all();
    }
}
