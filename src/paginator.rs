//! "Load more" pagination for the featured projects grid.
//!
//! `Paginator` owns the current page and the in-flight phase. Every exit
//! from `Loading` goes through [`Paginator::settle`], so a failed request
//! can never leave the control wedged.

use crate::cards::{cards_for_page, count_hint, ProjectCardView, ProjectSummary};
use crate::logging::{EventLog, LogLevel};
use crate::request::RequestFailure;
use serde::Deserialize;
use serde_json::json;
use std::cell::RefCell;

pub const CURRENT_PAGE_ATTRIBUTE: &str = "data-current-page";
pub const EXHAUSTED_LABEL: &str = "<i class=\"fas fa-check me-2\"></i>All Loaded";
pub const ERROR_CLASS: &str = "btn-danger";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProjectsPage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn page_url(endpoint: &str, page: u32) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}page={page}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFailure {
    /// The API answered with `success: false`.
    Rejected,
    /// No usable answer: network error or undecodable body.
    Unreachable,
}

impl PageFailure {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rejected => "Error",
            Self::Unreachable => "Failed",
        }
    }

    pub fn markup(self) -> String {
        format!("<i class=\"fas fa-times me-2\"></i>{}", self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerPhase {
    Idle,
    Loading { page: u32 },
    Errored(PageFailure),
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlState {
    Ready,
    Exhausted,
    Failed(PageFailure),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageSettlement {
    pub advanced_to: Option<u32>,
    pub cards: Vec<ProjectCardView>,
    pub control: ControlState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paginator {
    current_page: u32,
    phase: PagerPhase,
}

impl Paginator {
    pub fn new(current_page: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            phase: PagerPhase::Idle,
        }
    }

    /// Reads the grid's page attribute; anything unusable counts as page 1.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let current_page = raw
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(1);
        Self::new(current_page)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    /// Returns the page to request, or `None` when a click must be ignored.
    pub fn begin(&mut self) -> Option<u32> {
        match self.phase {
            PagerPhase::Loading { .. } | PagerPhase::Exhausted => None,
            PagerPhase::Idle | PagerPhase::Errored(_) => {
                let page = self.current_page.saturating_add(1);
                self.phase = PagerPhase::Loading { page };
                Some(page)
            }
        }
    }

    pub fn settle(&mut self, outcome: Result<ProjectsPage, RequestFailure>) -> PageSettlement {
        let PagerPhase::Loading { page } = self.phase else {
            return PageSettlement {
                advanced_to: None,
                cards: Vec::new(),
                control: self.control_state(),
            };
        };

        match outcome {
            Ok(payload) if payload.success => {
                self.current_page = page;
                self.phase = if payload.has_next {
                    PagerPhase::Idle
                } else {
                    PagerPhase::Exhausted
                };
                PageSettlement {
                    advanced_to: Some(page),
                    cards: cards_for_page(&payload.projects),
                    control: self.control_state(),
                }
            }
            Ok(_) => self.fail(PageFailure::Rejected),
            Err(_) => self.fail(PageFailure::Unreachable),
        }
    }

    fn fail(&mut self, failure: PageFailure) -> PageSettlement {
        self.phase = PagerPhase::Errored(failure);
        PageSettlement {
            advanced_to: None,
            cards: Vec::new(),
            control: ControlState::Failed(failure),
        }
    }

    fn control_state(&self) -> ControlState {
        match self.phase {
            PagerPhase::Exhausted => ControlState::Exhausted,
            PagerPhase::Errored(failure) => ControlState::Failed(failure),
            PagerPhase::Idle | PagerPhase::Loading { .. } => ControlState::Ready,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProjectSource {
    async fn fetch_page(&self, page: u32) -> Result<ProjectsPage, RequestFailure>;
}

/// The grid, its load-more control and the count hint.
pub trait PagerSurface {
    fn show_loading(&self);
    fn store_current_page(&self, page: u32);
    /// Appends the cards and returns how many project cards the grid now holds.
    fn append_cards(&self, cards: &[ProjectCardView]) -> usize;
    fn set_count_hint(&self, text: &str);
    fn mark_exhausted(&self);
    fn mark_failed(&self, failure: PageFailure);
    fn restore_idle(&self);
}

pub async fn load_more(
    pager: &RefCell<Paginator>,
    source: &impl ProjectSource,
    surface: &impl PagerSurface,
    log: EventLog,
) {
    let begun = pager.borrow_mut().begin();
    let Some(page) = begun else {
        log.emit(
            LogLevel::Debug,
            "projects_page_click_ignored",
            json!({ "phase": format!("{:?}", pager.borrow().phase()) }),
        );
        return;
    };

    surface.show_loading();
    log.emit(LogLevel::Debug, "projects_page_requested", json!({ "page": page }));

    let outcome = source.fetch_page(page).await;
    if let Err(failure) = &outcome {
        log.emit(
            LogLevel::Warn,
            "projects_page_unreachable",
            json!({ "page": page, "error_class": failure.as_str(), "detail": failure.detail() }),
        );
    }

    let server_message = outcome.as_ref().ok().and_then(|payload| payload.message.clone());
    let settlement = pager.borrow_mut().settle(outcome);

    if let Some(current) = settlement.advanced_to {
        surface.store_current_page(current);
        let total = surface.append_cards(&settlement.cards);
        surface.set_count_hint(&count_hint(total));
        log.emit(
            LogLevel::Info,
            "projects_page_loaded",
            json!({ "page": current, "rendered": settlement.cards.len(), "total": total }),
        );
    }

    match settlement.control {
        ControlState::Ready => surface.restore_idle(),
        ControlState::Exhausted => {
            surface.mark_exhausted();
            log.emit(LogLevel::Info, "projects_exhausted", json!({ "page": page }));
        }
        ControlState::Failed(failure) => {
            surface.mark_failed(failure);
            if failure == PageFailure::Rejected {
                log.emit(
                    LogLevel::Warn,
                    "projects_page_rejected",
                    json!({ "page": page, "message": server_message }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn summary(id: u64) -> ProjectSummary {
        ProjectSummary {
            id,
            title: format!("p{id}"),
            short_description: String::new(),
            image: None,
            live_url: None,
            technologies: Vec::new(),
            created_date: String::new(),
        }
    }

    fn page(has_next: bool, count: u64) -> ProjectsPage {
        ProjectsPage {
            success: true,
            has_next,
            projects: (1..=count).map(summary).collect(),
            message: None,
        }
    }

    struct ScriptedSource {
        calls: RefCell<Vec<u32>>,
        reply: Result<ProjectsPage, RequestFailure>,
    }

    impl ScriptedSource {
        fn new(reply: Result<ProjectsPage, RequestFailure>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl ProjectSource for ScriptedSource {
        async fn fetch_page(&self, page: u32) -> Result<ProjectsPage, RequestFailure> {
            self.calls.borrow_mut().push(page);
            tokio::task::yield_now().await;
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct RecordingGrid {
        existing: usize,
        titles: RefCell<Vec<String>>,
        stored_page: Cell<Option<u32>>,
        hint: RefCell<Option<String>>,
        loading: Cell<bool>,
        disabled: Cell<bool>,
        failure: Cell<Option<PageFailure>>,
    }

    impl PagerSurface for RecordingGrid {
        fn show_loading(&self) {
            self.loading.set(true);
            self.failure.set(None);
        }

        fn store_current_page(&self, page: u32) {
            self.stored_page.set(Some(page));
        }

        fn append_cards(&self, cards: &[ProjectCardView]) -> usize {
            let mut titles = self.titles.borrow_mut();
            titles.extend(cards.iter().map(|card| card.title.clone()));
            self.existing + titles.len()
        }

        fn set_count_hint(&self, text: &str) {
            *self.hint.borrow_mut() = Some(text.to_string());
        }

        fn mark_exhausted(&self) {
            self.loading.set(false);
            self.disabled.set(true);
        }

        fn mark_failed(&self, failure: PageFailure) {
            self.loading.set(false);
            self.failure.set(Some(failure));
        }

        fn restore_idle(&self) {
            self.loading.set(false);
        }
    }

    fn quiet() -> EventLog {
        EventLog::new(LogLevel::Error)
    }

    #[tokio::test]
    async fn successful_page_appends_at_most_three_cards() {
        let pager = RefCell::new(Paginator::new(1));
        let source = ScriptedSource::new(Ok(page(true, 5)));
        let grid = RecordingGrid {
            existing: 3,
            ..RecordingGrid::default()
        };

        load_more(&pager, &source, &grid, quiet()).await;

        assert_eq!(*source.calls.borrow(), vec![2]);
        assert_eq!(*grid.titles.borrow(), vec!["p1", "p2", "p3"]);
        assert_eq!(pager.borrow().current_page(), 2);
        assert_eq!(grid.stored_page.get(), Some(2));
        assert_eq!(grid.hint.borrow().as_deref(), Some("Showing 6 project(s)"));
        assert_eq!(pager.borrow().phase(), PagerPhase::Idle);
        assert!(!grid.loading.get());
        assert!(!grid.disabled.get());
    }

    #[tokio::test]
    async fn last_page_disables_the_control_for_good() {
        let pager = RefCell::new(Paginator::new(1));
        let source = ScriptedSource::new(Ok(page(false, 1)));
        let grid = RecordingGrid::default();

        load_more(&pager, &source, &grid, quiet()).await;
        load_more(&pager, &source, &grid, quiet()).await;

        assert!(grid.disabled.get());
        assert_eq!(pager.borrow().phase(), PagerPhase::Exhausted);
        assert_eq!(source.calls.borrow().len(), 1);
        assert_eq!(grid.titles.borrow().len(), 1);
    }

    #[tokio::test]
    async fn rapid_double_click_issues_one_request() {
        let pager = RefCell::new(Paginator::new(1));
        let source = ScriptedSource::new(Ok(page(true, 3)));
        let grid = RecordingGrid::default();

        tokio::join!(
            load_more(&pager, &source, &grid, quiet()),
            load_more(&pager, &source, &grid, quiet()),
        );

        assert_eq!(source.calls.borrow().len(), 1);
        assert_eq!(pager.borrow().current_page(), 2);
        assert_eq!(grid.titles.borrow().len(), 3);
    }

    #[tokio::test]
    async fn rejected_page_shows_error_and_keeps_page() {
        let pager = RefCell::new(Paginator::new(4));
        let source = ScriptedSource::new(Ok(ProjectsPage::default()));
        let grid = RecordingGrid::default();

        load_more(&pager, &source, &grid, quiet()).await;

        assert_eq!(grid.failure.get(), Some(PageFailure::Rejected));
        assert_eq!(pager.borrow().current_page(), 4);
        assert_eq!(grid.stored_page.get(), None);
        assert!(grid.hint.borrow().is_none());
    }

    #[tokio::test]
    async fn transport_failure_allows_retry_of_the_same_page() {
        let pager = RefCell::new(Paginator::new(1));
        let failing = ScriptedSource::new(Err(RequestFailure::Network("offline".to_string())));
        let grid = RecordingGrid::default();

        load_more(&pager, &failing, &grid, quiet()).await;
        assert_eq!(grid.failure.get(), Some(PageFailure::Unreachable));
        assert_eq!(PageFailure::Unreachable.label(), "Failed");

        let recovered = ScriptedSource::new(Ok(page(true, 2)));
        load_more(&pager, &recovered, &grid, quiet()).await;

        assert_eq!(*failing.calls.borrow(), vec![2]);
        assert_eq!(*recovered.calls.borrow(), vec![2]);
        assert_eq!(grid.failure.get(), None);
        assert_eq!(pager.borrow().current_page(), 2);
    }

    #[test]
    fn page_attribute_parsing_defaults_to_first_page() {
        assert_eq!(Paginator::from_attribute(Some("3")).current_page(), 3);
        assert_eq!(Paginator::from_attribute(Some("zero")).current_page(), 1);
        assert_eq!(Paginator::from_attribute(Some("0")).current_page(), 1);
        assert_eq!(Paginator::from_attribute(None).current_page(), 1);
    }

    #[test]
    fn settle_without_begin_changes_nothing() {
        let mut pager = Paginator::new(2);
        let settlement = pager.settle(Ok(page(false, 3)));

        assert_eq!(settlement.advanced_to, None);
        assert_eq!(settlement.control, ControlState::Ready);
        assert_eq!(pager.phase(), PagerPhase::Idle);
    }

    #[test]
    fn page_without_success_flag_settles_as_rejected() {
        let parsed: ProjectsPage =
            serde_json::from_str(r#"{"message": "Invalid page"}"#).expect("page parses");
        let mut pager = Paginator::new(1);
        pager.begin();

        let settlement = pager.settle(Ok(parsed));

        assert_eq!(settlement.control, ControlState::Failed(PageFailure::Rejected));
        assert_eq!(PageFailure::Rejected.label(), "Error");
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn projects_response_parses_from_api_json() {
        let parsed: ProjectsPage = serde_json::from_str(
            r#"{"success": true, "has_next": false, "has_previous": true, "current_page": 2,
                "total_pages": 2, "projects": []}"#,
        )
        .expect("page parses");

        assert!(parsed.success);
        assert!(!parsed.has_next);
        assert_eq!(page_url("/api/projects/", 2), "/api/projects/?page=2");
        assert_eq!(page_url("/api/projects/?filter=rust", 3), "/api/projects/?filter=rust&page=3");
    }
}
